//! Driver capability descriptor.

use super::mode::{OperationMode, OperationModes};
use super::resolution::{Resolution, Resolutions};

/// What a driver instance can do.
///
/// Fixed when the driver is set up and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capabilities {
    max_speed: u32,
    modes: OperationModes,
    resolutions: Resolutions,
}

impl Capabilities {
    /// Create a capability descriptor.
    ///
    /// `max_speed` is the highest full-step rate (full steps per second) any
    /// velocity may reach, in either direction.
    pub const fn new(max_speed: u32, modes: OperationModes, resolutions: Resolutions) -> Self {
        Self {
            max_speed,
            modes,
            resolutions,
        }
    }

    /// Highest supported full-step speed.
    #[inline]
    pub const fn max_speed(&self) -> u32 {
        self.max_speed
    }

    /// Supported operation modes.
    #[inline]
    pub const fn modes(&self) -> OperationModes {
        self.modes
    }

    /// Supported microstep resolutions.
    #[inline]
    pub const fn resolutions(&self) -> Resolutions {
        self.resolutions
    }

    /// Check whether a mode is supported.
    #[inline]
    pub const fn supports_mode(&self, mode: OperationMode) -> bool {
        self.modes.contains(mode)
    }

    /// Check whether a resolution is supported.
    #[inline]
    pub const fn supports_resolution(&self, resolution: Resolution) -> bool {
        self.resolutions.contains(resolution)
    }

    /// Check whether a full-step speed magnitude is within range (inclusive).
    #[inline]
    pub const fn speed_in_range(&self, speed: u32) -> bool {
        speed <= self.max_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_are_independent() {
        let caps = Capabilities::new(
            1000,
            OperationModes::only(OperationMode::Velocity),
            Resolution::Full | Resolution::Half,
        );

        assert!(caps.supports_mode(OperationMode::Velocity));
        assert!(!caps.supports_mode(OperationMode::Position));
        assert!(caps.supports_resolution(Resolution::Half));
        assert!(!caps.supports_resolution(Resolution::Quarter));
    }

    #[test]
    fn test_speed_bound_is_inclusive() {
        let caps = Capabilities::new(800, OperationModes::empty(), Resolutions::empty());
        assert!(caps.speed_in_range(0));
        assert!(caps.speed_in_range(800));
        assert!(!caps.speed_in_range(801));
    }
}
