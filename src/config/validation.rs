//! Configuration validation.

use crate::caps::MotorProperties;
use crate::error::{name_of, ConfigError, Error, Result};
use crate::validation::validate;

use super::{DriverConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Drivers have a positive max speed, at least one usable mode and resolution
/// - Motor indices are unique and below the driver's motor count
/// - Named motors reference existing drivers and outputs
/// - Presets reference existing motors and pass command validation
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    // Validate drivers
    for (name, driver) in config.drivers.iter() {
        validate_driver(name.as_str(), driver)?;
    }

    // Validate motor references
    for (name, _) in config.motors.iter() {
        validate_motor(name.as_str(), config)?;
    }

    // Validate presets
    for (name, _) in config.presets.iter() {
        validate_preset(name.as_str(), config)?;
    }

    Ok(())
}

fn validate_driver(name: &str, config: &DriverConfig) -> Result<()> {
    if config.max_speed == 0 {
        return Err(Error::Config(ConfigError::InvalidMaxSpeed(name_of(name))));
    }

    let caps = config.capabilities();

    // Acceleration alone leaves nothing after filtering
    if caps.modes().is_empty() {
        return Err(Error::Config(ConfigError::NoOperationModes(name_of(name))));
    }

    if caps.resolutions().is_empty() {
        return Err(Error::Config(ConfigError::NoResolutions(name_of(name))));
    }

    check_motor_table(name, &config.motors)
}

/// Check a driver's motor table.
///
/// Every output index must be unique and below the number of motors, and
/// every motor needs a positive step count.
pub(crate) fn check_motor_table(driver: &str, motors: &[MotorProperties]) -> Result<()> {
    let n_motors = motors.len();
    for (i, motor) in motors.iter().enumerate() {
        if motor.steps_per_turn == 0 {
            return Err(Error::Config(ConfigError::InvalidStepsPerTurn {
                driver: name_of(driver),
                index: motor.index,
            }));
        }

        if usize::from(motor.index) >= n_motors {
            return Err(Error::Config(ConfigError::MotorIndexOutOfRange {
                driver: name_of(driver),
                index: motor.index,
                n_motors,
            }));
        }

        if motors[..i].iter().any(|m| m.index == motor.index) {
            return Err(Error::Config(ConfigError::DuplicateMotorIndex {
                driver: name_of(driver),
                index: motor.index,
            }));
        }
    }

    Ok(())
}

fn validate_motor(name: &str, config: &SystemConfig) -> Result<()> {
    let spec = config
        .motor(name)
        .ok_or_else(|| Error::Config(ConfigError::MotorNotFound(name_of(name))))?;

    // Driver must exist
    if config.driver(spec.driver.as_str()).is_none() {
        return Err(Error::Config(ConfigError::DriverNotFound(spec.driver.clone())));
    }

    // Output must be attached
    if config.motor_properties(name).is_none() {
        return Err(Error::Config(ConfigError::MotorIndexOutOfRange {
            driver: spec.driver.clone(),
            index: spec.output,
            n_motors: config
                .driver(spec.driver.as_str())
                .map_or(0, |d| d.motors.len()),
        }));
    }

    Ok(())
}

fn validate_preset(name: &str, config: &SystemConfig) -> Result<()> {
    let preset = config
        .preset(name)
        .ok_or_else(|| Error::Config(ConfigError::PresetNotFound(name_of(name))))?;

    // Motor must exist
    let spec = config
        .motor(preset.motor.as_str())
        .ok_or_else(|| Error::Config(ConfigError::MotorNotFound(preset.motor.clone())))?;

    let driver = config
        .driver(spec.driver.as_str())
        .ok_or_else(|| Error::Config(ConfigError::DriverNotFound(spec.driver.clone())))?;

    let action = preset.to_action(name)?;

    validate(&driver.capabilities(), &driver.registry(), spec.output, &action).map_err(
        |reason| {
            Error::Config(ConfigError::RejectedPreset {
                preset: name_of(name),
                reason,
            })
        },
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::{OperationMode, Resolution};
    use heapless::Vec;

    fn driver(motors: &[MotorProperties]) -> DriverConfig {
        DriverConfig {
            max_speed: 1000,
            modes: Vec::from_slice(&[OperationMode::Position]).unwrap(),
            resolutions: Vec::from_slice(&[Resolution::Full]).unwrap(),
            motors: Vec::from_slice(motors).unwrap(),
        }
    }

    #[test]
    fn test_duplicate_motor_index() {
        let config = driver(&[MotorProperties::new(0, 200), MotorProperties::new(0, 400)]);
        assert!(matches!(
            validate_driver("tmc", &config),
            Err(Error::Config(ConfigError::DuplicateMotorIndex { index: 0, .. }))
        ));
    }

    #[test]
    fn test_index_beyond_motor_count() {
        let config = driver(&[MotorProperties::new(0, 200), MotorProperties::new(2, 200)]);
        assert!(matches!(
            validate_driver("tmc", &config),
            Err(Error::Config(ConfigError::MotorIndexOutOfRange {
                index: 2,
                n_motors: 2,
                ..
            }))
        ));
    }

    #[test]
    fn test_zero_steps_per_turn() {
        let config = driver(&[MotorProperties::new(0, 0)]);
        assert!(matches!(
            validate_driver("tmc", &config),
            Err(Error::Config(ConfigError::InvalidStepsPerTurn { .. }))
        ));
    }

    #[test]
    fn test_acceleration_only_driver() {
        let mut config = driver(&[MotorProperties::new(0, 200)]);
        config.modes = Vec::from_slice(&[OperationMode::Acceleration]).unwrap();
        assert!(matches!(
            validate_driver("tmc", &config),
            Err(Error::Config(ConfigError::NoOperationModes(_)))
        ));
    }

    #[test]
    fn test_driver_without_motors_is_valid() {
        assert!(validate_driver("tmc", &driver(&[])).is_ok());
    }
}
