//! Driver configuration from TOML.

use heapless::Vec;
use serde::Deserialize;

use crate::caps::{
    Capabilities, MotorProperties, MotorRegistry, OperationMode, OperationModes, Resolution,
    Resolutions, MAX_MOTORS,
};

/// Static configuration of one driver instance.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverConfig {
    /// Highest supported full-step speed (full steps per second).
    pub max_speed: u32,

    /// Operation modes the driver chip offers.
    pub modes: Vec<OperationMode, 8>,

    /// Microstep resolutions the driver chip offers (1, 2, 4, ... 256).
    pub resolutions: Vec<Resolution, 16>,

    /// Attached motors.
    #[serde(default)]
    pub motors: Vec<MotorProperties, MAX_MOTORS>,
}

impl DriverConfig {
    /// Build the capability descriptor.
    ///
    /// Acceleration mode is not executed by any backend yet and is dropped
    /// here even when configured.
    pub fn capabilities(&self) -> Capabilities {
        let mut modes: OperationModes = self.modes.iter().copied().collect();
        if modes.contains(OperationMode::Acceleration) {
            warn!("acceleration mode is not supported, ignoring");
            modes.remove(OperationMode::Acceleration);
        }

        let resolutions: Resolutions = self.resolutions.iter().copied().collect();

        Capabilities::new(self.max_speed, modes, resolutions)
    }

    /// Build the motor table.
    pub fn registry(&self) -> MotorRegistry {
        let mut registry = MotorRegistry::new();
        for motor in &self.motors {
            // Both tables hold MAX_MOTORS entries.
            let _ = registry.push(*motor);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(modes: &[OperationMode]) -> DriverConfig {
        DriverConfig {
            max_speed: 1000,
            modes: Vec::from_slice(modes).unwrap(),
            resolutions: Vec::from_slice(&[Resolution::Full, Resolution::Sixteenth]).unwrap(),
            motors: Vec::from_slice(&[MotorProperties::new(0, 200)]).unwrap(),
        }
    }

    #[test]
    fn test_acceleration_is_filtered() {
        let caps = config(&[OperationMode::Velocity, OperationMode::Acceleration]).capabilities();
        assert!(caps.supports_mode(OperationMode::Velocity));
        assert!(!caps.supports_mode(OperationMode::Acceleration));
    }

    #[test]
    fn test_capabilities_and_registry() {
        let config = config(&[OperationMode::Position]);
        let caps = config.capabilities();
        assert_eq!(caps.max_speed(), 1000);
        assert_eq!(caps.resolutions(), Resolution::Full | Resolution::Sixteenth);

        let registry = config.registry();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(0).map(|m| m.steps_per_turn), Some(200));
    }
}
