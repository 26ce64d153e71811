//! Command validation.
//!
//! Decides whether an [`Action`] may be sent to a motor, given the driver's
//! [`Capabilities`] and [`MotorRegistry`]. Checks run in a fixed order and the
//! first failure is reported:
//!
//! 1. motor index in range
//! 2. operation mode supported
//! 3. a resolution is requested
//! 4. a requested resolution is supported
//! 5. exactly one resolution is requested
//! 6. mode-specific velocity and ramp bounds
//!
//! The functions here have no side effects and may be called from any
//! context.

use crate::action::{Action, Motion};
use crate::caps::{Capabilities, MotorRegistry, Resolution};
use crate::error::ValidationError;

/// A command that passed validation.
///
/// Only [`validate`] constructs this type, so a backend receiving one knows
/// the checks have run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ApprovedAction {
    motor: u8,
    motion: Motion,
    resolution: Resolution,
}

impl ApprovedAction {
    /// Target motor index.
    #[inline]
    pub const fn motor(&self) -> u8 {
        self.motor
    }

    /// Motion to perform.
    #[inline]
    pub const fn motion(&self) -> &Motion {
        &self.motion
    }

    /// The single resolution the motion runs at.
    #[inline]
    pub const fn resolution(&self) -> Resolution {
        self.resolution
    }
}

/// Check that `motor` is a valid index for the driver.
///
/// # Errors
///
/// `ValidationError::NoSuchMotor` when `motor >= registry.len()`.
pub fn check_motor(registry: &MotorRegistry, motor: u8) -> Result<(), ValidationError> {
    if registry.in_range(motor) {
        Ok(())
    } else {
        warn!("motor {} out of range", motor);
        Err(ValidationError::NoSuchMotor(motor))
    }
}

/// Validate an action for a motor.
///
/// # Errors
///
/// Returns the first [`ValidationError`] in check order.
pub fn validate(
    caps: &Capabilities,
    registry: &MotorRegistry,
    motor: u8,
    action: &Action,
) -> Result<ApprovedAction, ValidationError> {
    check_motor(registry, motor)?;

    let result = check_action(caps, action);
    match result {
        Ok(resolution) => {
            trace!("motor {} action approved", motor);
            Ok(ApprovedAction {
                motor,
                motion: action.motion,
                resolution,
            })
        }
        Err(e) => {
            warn!("motor {} action rejected: {}", motor, e);
            Err(e)
        }
    }
}

fn check_action(caps: &Capabilities, action: &Action) -> Result<Resolution, ValidationError> {
    let mode = action.mode();
    if !caps.supports_mode(mode) {
        return Err(ValidationError::UnsupportedOperation(mode));
    }

    let resolution = check_resolution(caps, action)?;

    match action.motion {
        Motion::Positioning { .. } => {}
        Motion::Velocity { velocity, .. } => check_velocity(caps, velocity)?,
        Motion::Acceleration {
            start_velocity,
            end_velocity,
            ..
        } => {
            check_velocity(caps, start_velocity)?;
            check_velocity(caps, end_velocity)?;
        }
        Motion::SmoothPositioning {
            max_velocity,
            acceleration_time_us,
            ..
        } => {
            // Zero ramp time would mean instantaneous acceleration.
            if !caps.speed_in_range(max_velocity) || acceleration_time_us == 0 {
                return Err(ValidationError::InvalidRampParameters {
                    max_velocity,
                    acceleration_time_us,
                });
            }
        }
    }

    Ok(resolution)
}

fn check_resolution(caps: &Capabilities, action: &Action) -> Result<Resolution, ValidationError> {
    let requested = action.resolutions;

    if requested.is_empty() {
        return Err(ValidationError::MissingResolution);
    }

    if !requested.intersects(caps.resolutions()) {
        return Err(ValidationError::UnsupportedResolution(requested));
    }

    requested
        .single()
        .ok_or(ValidationError::AmbiguousResolution(requested))
}

fn check_velocity(caps: &Capabilities, velocity: i32) -> Result<(), ValidationError> {
    let requested = velocity.unsigned_abs();
    if caps.speed_in_range(requested) {
        Ok(())
    } else {
        Err(ValidationError::VelocityOutOfRange {
            requested,
            max: caps.max_speed(),
        })
    }
}
