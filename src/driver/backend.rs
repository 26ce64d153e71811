//! The seam between the validated command surface and a concrete driver.

use crate::error::BackendError;
use crate::validation::ApprovedAction;

/// Entry points a stepper driver backend implements.
///
/// [`StepperDriver`](super::StepperDriver) calls these only after the motor
/// index has been checked, and `move_motor` only with a validated command.
///
/// `move_motor` may block for bounded commands (a positioning move, or a
/// velocity command with a non-zero duration). A velocity command with
/// `duration_us == 0` starts continuous motion and returns immediately.
pub trait StepperBackend {
    /// Energize the coils of `motor`.
    fn enable(&mut self, motor: u8) -> Result<(), BackendError>;

    /// De-energize the coils of `motor`.
    fn disable(&mut self, motor: u8) -> Result<(), BackendError>;

    /// Execute a validated command.
    fn move_motor(&mut self, command: &ApprovedAction) -> Result<(), BackendError>;
}

impl<B: StepperBackend + ?Sized> StepperBackend for &mut B {
    #[inline]
    fn enable(&mut self, motor: u8) -> Result<(), BackendError> {
        (**self).enable(motor)
    }

    #[inline]
    fn disable(&mut self, motor: u8) -> Result<(), BackendError> {
        (**self).disable(motor)
    }

    #[inline]
    fn move_motor(&mut self, command: &ApprovedAction) -> Result<(), BackendError> {
        (**self).move_motor(command)
    }
}
