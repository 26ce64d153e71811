//! Per-motor handle.

use crate::action::Action;
use crate::caps::MotorProperties;
use crate::error::{Result, ValidationError};

use super::backend::StepperBackend;
use super::stepper::StepperDriver;

/// A single motor on a driver, with its static properties.
///
/// Obtained from [`StepperDriver::motor`]. All commands go through the same
/// validation as the driver-level calls.
pub struct MotorHandle<'a, B>
where
    B: StepperBackend,
{
    driver: &'a mut StepperDriver<B>,
    properties: MotorProperties,
}

impl<'a, B> MotorHandle<'a, B>
where
    B: StepperBackend,
{
    pub(crate) fn new(driver: &'a mut StepperDriver<B>, properties: MotorProperties) -> Self {
        Self { driver, properties }
    }

    /// Driver output index.
    #[inline]
    pub fn index(&self) -> u8 {
        self.properties.index
    }

    /// Full steps per shaft turn.
    #[inline]
    pub fn steps_per_turn(&self) -> u32 {
        self.properties.steps_per_turn
    }

    /// Static motor properties.
    #[inline]
    pub fn properties(&self) -> &MotorProperties {
        &self.properties
    }

    /// Turn on coil current.
    pub fn enable(&mut self) -> Result<()> {
        self.driver.enable(self.properties.index)
    }

    /// Turn off coil current.
    pub fn disable(&mut self) -> Result<()> {
        self.driver.disable(self.properties.index)
    }

    /// Validate and execute an action on this motor.
    pub fn move_motor(&mut self, action: &Action) -> Result<()> {
        self.driver.move_motor(self.properties.index, action)
    }

    /// Stop any running motion.
    ///
    /// Sends [`Action::STOP`] at the coarsest resolution the driver supports,
    /// so drivers without full-step mode can still be stopped.
    pub fn stop(&mut self) -> Result<()> {
        let stop = match self.driver.capabilities().resolutions().coarsest() {
            Some(resolution) => Action::stop(resolution),
            None => Action::STOP,
        };
        self.move_motor(&stop)
    }

    /// Turn the shaft by an angle at `velocity` full steps per second.
    ///
    /// The angle is rounded to whole full steps; its sign overrides the sign
    /// of `velocity`. Uses the coarsest supported resolution.
    ///
    /// # Errors
    ///
    /// `ValidationError::MissingResolution` if the driver supports no
    /// resolution, otherwise as [`StepperDriver::move_motor`].
    pub fn rotate_degrees(&mut self, degrees: f32, velocity: u32) -> Result<()> {
        let resolution = self
            .driver
            .capabilities()
            .resolutions()
            .coarsest()
            .ok_or(ValidationError::MissingResolution)?;

        let steps = self.properties.degrees_to_steps(degrees);
        let speed = i32::try_from(velocity).unwrap_or(i32::MAX);
        let velocity = if steps < 0 { -speed } else { speed };

        self.move_motor(&Action::positioning(
            velocity,
            steps.unsigned_abs(),
            resolution,
        ))
    }
}
