//! Capability negotiation model.
//!
//! Describes what a driver instance supports ([`Capabilities`]) and which
//! motors it drives ([`MotorRegistry`]).

mod capabilities;
mod mode;
mod registry;
mod resolution;

pub use capabilities::Capabilities;
pub use mode::{OperationMode, OperationModes};
pub use registry::{MotorProperties, MotorRegistry, MAX_MOTORS};
pub use resolution::{Resolution, Resolutions};
