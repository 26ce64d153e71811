//! Driver module for stepper-api.
//!
//! Provides the backend trait, the validating driver facade and a simulated
//! backend for host-side use.

mod backend;
mod builder;
mod handle;
mod sim;
mod stepper;

pub use backend::StepperBackend;
pub use builder::StepperDriverBuilder;
pub use handle::MotorHandle;
pub use sim::{SimulatedBackend, SimulatedMotor};
pub use stepper::StepperDriver;
