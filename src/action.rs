//! Motion commands.
//!
//! An [`Action`] pairs one [`Motion`] with the microstep resolution it should
//! run at. Velocities are in full steps per second and the sign encodes the
//! direction of rotation.

use crate::caps::{OperationMode, Resolution, Resolutions};

/// The kind of movement to perform, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motion {
    /// Move a precise number of steps at constant velocity.
    Positioning {
        /// Stepping velocity; the sign gives the direction.
        velocity: i32,
        /// Number of steps to take.
        steps: u32,
    },
    /// Run at constant velocity.
    ///
    /// A `duration_us` of 0 starts continuous motion that lasts until the next
    /// action. Otherwise the call lasts at least `duration_us` and the motor
    /// keeps its velocity afterwards; no stop is implied.
    Velocity {
        /// Stepping velocity; the sign gives the direction.
        velocity: i32,
        /// Coasting time in microseconds.
        duration_us: u32,
    },
    /// Ramp linearly between two velocities.
    Acceleration {
        /// Velocity at the start of the action.
        start_velocity: i32,
        /// Velocity at the end of the action.
        end_velocity: i32,
        /// Duration of the ramp in microseconds.
        duration_us: u32,
    },
    /// Move a precise number of steps with acceleration and deceleration ramps.
    SmoothPositioning {
        /// Number of steps to take; the sign gives the direction.
        steps: i32,
        /// Highest stepping rate during the move.
        max_velocity: u32,
        /// Time to reach `max_velocity` from standstill, in microseconds.
        acceleration_time_us: u32,
    },
}

impl Motion {
    /// Operation mode a driver must support to run this motion.
    pub const fn mode(&self) -> OperationMode {
        match self {
            Motion::Positioning { .. } => OperationMode::Position,
            Motion::Velocity { .. } => OperationMode::Velocity,
            Motion::Acceleration { .. } => OperationMode::Acceleration,
            Motion::SmoothPositioning { .. } => OperationMode::PositionSmooth,
        }
    }

    /// True for a velocity motion that never ends on its own.
    pub const fn is_continuous(&self) -> bool {
        matches!(self, Motion::Velocity { duration_us: 0, .. })
    }
}

/// A motion command addressed to one motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Action {
    /// What to do.
    pub motion: Motion,
    /// Requested microstep resolution. Must hold exactly one supported member.
    pub resolutions: Resolutions,
}

impl Action {
    /// Zero velocity, no duration, full-step resolution.
    ///
    /// The universal command to end any running motion.
    pub const STOP: Action = Action::stop(Resolution::Full);

    /// Create an action from its parts.
    pub const fn new(motion: Motion, resolutions: Resolutions) -> Self {
        Self {
            motion,
            resolutions,
        }
    }

    /// Stop command at a specific resolution.
    pub const fn stop(resolution: Resolution) -> Self {
        Self::velocity(0, 0, resolution)
    }

    /// Relative move of `steps` at `velocity`.
    pub const fn positioning(velocity: i32, steps: u32, resolution: Resolution) -> Self {
        Self::new(
            Motion::Positioning { velocity, steps },
            Resolutions::only(resolution),
        )
    }

    /// Run at `velocity`, for `duration_us` or indefinitely when 0.
    pub const fn velocity(velocity: i32, duration_us: u32, resolution: Resolution) -> Self {
        Self::new(
            Motion::Velocity {
                velocity,
                duration_us,
            },
            Resolutions::only(resolution),
        )
    }

    /// Linear ramp from `start_velocity` to `end_velocity`.
    pub const fn acceleration(
        start_velocity: i32,
        end_velocity: i32,
        duration_us: u32,
        resolution: Resolution,
    ) -> Self {
        Self::new(
            Motion::Acceleration {
                start_velocity,
                end_velocity,
                duration_us,
            },
            Resolutions::only(resolution),
        )
    }

    /// Ramped relative move of `steps`.
    pub const fn smooth_positioning(
        steps: i32,
        max_velocity: u32,
        acceleration_time_us: u32,
        resolution: Resolution,
    ) -> Self {
        Self::new(
            Motion::SmoothPositioning {
                steps,
                max_velocity,
                acceleration_time_us,
            },
            Resolutions::only(resolution),
        )
    }

    /// Replace the requested resolutions.
    pub const fn with_resolutions(mut self, resolutions: Resolutions) -> Self {
        self.resolutions = resolutions;
        self
    }

    /// Operation mode this action needs.
    #[inline]
    pub const fn mode(&self) -> OperationMode {
        self.motion.mode()
    }
}
