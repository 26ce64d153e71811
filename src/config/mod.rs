//! Configuration module for stepper-api.
//!
//! Provides types for loading and validating driver, motor and preset
//! configurations from TOML files (with `std` feature) or pre-parsed data.

mod driver;
#[cfg(feature = "std")]
mod loader;
mod motor;
mod preset;
mod system;
mod validation;

pub use driver::DriverConfig;
pub use motor::MotorSpec;
pub use preset::{ActionType, PresetConfig};
pub use system::SystemConfig;
pub(crate) use validation::check_motor_table;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
