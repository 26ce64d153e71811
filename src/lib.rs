//! # stepper-api
//!
//! Capability-checked command interface for multi-motor stepper drivers.
//!
//! ## Features
//!
//! - **Capability negotiation**: Drivers declare operation modes, microstep
//!   resolutions and a full-step speed bound
//! - **Validated commands**: Every action is checked against the capabilities
//!   and motor table before a backend sees it
//! - **Configuration-driven**: Drivers, motors and named presets in TOML
//! - **embedded-hal 1.0**: The simulated backend times moves with `DelayNs`
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_api::{Action, Resolution, SimulatedBackend, StepperDriver};
//!
//! let config = stepper_api::load_config("steppers.toml")?;
//!
//! let mut driver = StepperDriver::builder()
//!     .from_config(&config, "tmc")?
//!     .backend(SimulatedBackend::new(2, delay))
//!     .build()?;
//!
//! driver.enable(0)?;
//! driver.move_motor(0, &Action::positioning(500, 200, Resolution::Full))?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Logging macros must come first so every module sees them
#[macro_use]
mod log;

// Core modules
pub mod action;
pub mod caps;
pub mod config;
pub mod driver;
pub mod error;
pub mod preset;
pub mod validation;

// Re-exports for ergonomic API
pub use action::{Action, Motion};
pub use caps::{
    Capabilities, MotorProperties, MotorRegistry, OperationMode, OperationModes, Resolution,
    Resolutions, MAX_MOTORS,
};
pub use config::{validate_config, DriverConfig, MotorSpec, PresetConfig, SystemConfig};
pub use driver::{
    MotorHandle, SimulatedBackend, SimulatedMotor, StepperBackend, StepperDriver,
    StepperDriverBuilder,
};
pub use error::{BackendError, ConfigError, Error, Result, ValidationError};
pub use preset::{Preset, PresetRegistry};
pub use validation::{validate, ApprovedAction};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
