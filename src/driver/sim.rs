//! Host-side simulated backend.
//!
//! Tracks what each motor would be doing without generating any step signal.
//! Bounded commands block on an `embedded-hal` delay provider for as long as
//! the real motion would take, so timing can be observed in tests.
//!
//! Commands are serialized by `&mut` access: a second command for a motor
//! cannot start until the previous bounded command has returned.

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use crate::action::Motion;
use crate::caps::{OperationMode, Resolution, MAX_MOTORS};
use crate::error::BackendError;
use crate::validation::ApprovedAction;

use super::backend::StepperBackend;

const US_PER_SEC: u64 = 1_000_000;

/// Simulated state of one motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedMotor {
    /// Coil current on.
    pub enabled: bool,
    /// Velocity the motor keeps running at (full steps per second).
    pub velocity: i32,
    /// Absolute position in full steps.
    pub position: i64,
    /// Resolution of the last command.
    pub resolution: Resolution,
    /// Number of commands executed.
    pub commands: u32,
}

impl Default for SimulatedMotor {
    fn default() -> Self {
        Self {
            enabled: false,
            velocity: 0,
            position: 0,
            resolution: Resolution::Full,
            commands: 0,
        }
    }
}

/// Backend simulating a multi-output stepper driver.
///
/// Generic over:
/// - `DELAY`: Delay provider used to block for bounded commands
pub struct SimulatedBackend<DELAY>
where
    DELAY: DelayNs,
{
    delay: DELAY,
    motors: Vec<SimulatedMotor, MAX_MOTORS>,
    require_enable: bool,
}

impl<DELAY> SimulatedBackend<DELAY>
where
    DELAY: DelayNs,
{
    /// Create a backend with `n_motors` outputs (capped at [`MAX_MOTORS`]).
    pub fn new(n_motors: usize, delay: DELAY) -> Self {
        let mut motors = Vec::new();
        for _ in 0..n_motors.min(MAX_MOTORS) {
            let _ = motors.push(SimulatedMotor::default());
        }
        Self {
            delay,
            motors,
            require_enable: true,
        }
    }

    /// Allow moves on motors that were never enabled.
    pub fn allow_disabled_moves(mut self) -> Self {
        self.require_enable = false;
        self
    }

    /// Simulated state of `motor`.
    pub fn motor(&self, motor: u8) -> Option<&SimulatedMotor> {
        self.motors.get(usize::from(motor))
    }

    /// Borrow the delay provider.
    pub fn delay(&self) -> &DELAY {
        &self.delay
    }

    fn motor_mut(&mut self, motor: u8) -> Result<&mut SimulatedMotor, BackendError> {
        // The driver checks indices against its own table, which may be
        // larger than the simulated output count.
        self.motors
            .get_mut(usize::from(motor))
            .ok_or(BackendError::Io)
    }

    fn block_for(&mut self, mut us: u64) {
        while us > 0 {
            let chunk = us.min(u64::from(u32::MAX));
            self.delay.delay_us(chunk as u32);
            us -= chunk;
        }
    }
}

/// Time to travel `steps` at a constant `velocity`, in microseconds.
fn constant_velocity_time_us(steps: u64, velocity: u32) -> Option<u64> {
    if steps == 0 {
        return Some(0);
    }
    if velocity == 0 {
        return None;
    }
    Some(steps * US_PER_SEC / u64::from(velocity))
}

/// Time for a ramped move, in microseconds.
///
/// Symmetric linear ramps reach `max_velocity` after `ramp_us`. If the move is
/// too short to reach it, the profile is triangular.
fn smooth_move_time_us(steps: u64, max_velocity: u32, ramp_us: u32) -> Option<u64> {
    if steps == 0 {
        return Some(0);
    }
    if max_velocity == 0 {
        return None;
    }

    // Distance covered by the acceleration and deceleration ramps together.
    let ramp_steps = u64::from(max_velocity) * u64::from(ramp_us) / US_PER_SEC;
    if steps >= ramp_steps {
        Some(steps * US_PER_SEC / u64::from(max_velocity) + u64::from(ramp_us))
    } else {
        let ramp_s = ramp_us as f32 / US_PER_SEC as f32;
        let peak_s = libm::sqrtf(steps as f32 * ramp_s / max_velocity as f32);
        Some((2.0 * peak_s * US_PER_SEC as f32) as u64)
    }
}

impl<DELAY> StepperBackend for SimulatedBackend<DELAY>
where
    DELAY: DelayNs,
{
    fn enable(&mut self, motor: u8) -> Result<(), BackendError> {
        self.motor_mut(motor)?.enabled = true;
        Ok(())
    }

    fn disable(&mut self, motor: u8) -> Result<(), BackendError> {
        let state = self.motor_mut(motor)?;
        state.enabled = false;
        state.velocity = 0;
        Ok(())
    }

    fn move_motor(&mut self, command: &ApprovedAction) -> Result<(), BackendError> {
        let motor = command.motor();
        let require_enable = self.require_enable;
        let state = self.motor_mut(motor)?;

        if require_enable && !state.enabled {
            return Err(BackendError::NotEnabled(motor));
        }

        let (blocking_us, velocity, delta) = match *command.motion() {
            Motion::Positioning { velocity, steps } => {
                let time = constant_velocity_time_us(u64::from(steps), velocity.unsigned_abs())
                    .ok_or(BackendError::Stalled(motor))?;
                let delta = i64::from(steps) * i64::from(velocity.signum());
                (time, 0, delta)
            }
            Motion::Velocity {
                velocity,
                duration_us,
            } => {
                let delta = i64::from(velocity) * i64::from(duration_us) / US_PER_SEC as i64;
                (u64::from(duration_us), velocity, delta)
            }
            Motion::Acceleration { .. } => {
                return Err(BackendError::Unsupported(OperationMode::Acceleration));
            }
            Motion::SmoothPositioning {
                steps,
                max_velocity,
                acceleration_time_us,
            } => {
                let time = smooth_move_time_us(
                    u64::from(steps.unsigned_abs()),
                    max_velocity,
                    acceleration_time_us,
                )
                .ok_or(BackendError::Stalled(motor))?;
                (time, 0, i64::from(steps))
            }
        };

        state.velocity = velocity;
        state.position += delta;
        state.resolution = command.resolution();
        state.commands += 1;

        trace!("sim motor {} blocking {} us", motor, blocking_us);
        self.block_for(blocking_us);
        Ok(())
    }
}
