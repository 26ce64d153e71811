//! Unit tests for configuration validation.

use stepper_api::config::{validate_config, SystemConfig};
use stepper_api::error::{ConfigError, Error, ValidationError};
use stepper_api::OperationMode;

const DRIVER: &str = r#"
[drivers.tmc]
max_speed = 1000
modes = ["position", "velocity", "position_smooth"]
resolutions = [1, 16]
motors = [
    { index = 0, steps_per_turn = 200 },
    { index = 1, steps_per_turn = 200 },
]

[motors.pan]
driver = "tmc"
output = 0
"#;

fn parse(extra: &str) -> SystemConfig {
    let toml_str = format!("{DRIVER}{extra}");
    toml::from_str(&toml_str).expect("Failed to parse TOML")
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config = parse(
        r#"
[presets.spin]
motor = "pan"
type = "velocity"
resolution = 16
velocity = 1000
"#,
    );
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a zero maximum speed.
#[test]
fn test_zero_max_speed() {
    let toml_str = r#"
[drivers.slow]
max_speed = 0
modes = ["position"]
resolutions = [1]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMaxSpeed(_)))
    ));
}

/// Test validation fails for a driver without resolutions.
#[test]
fn test_no_resolutions() {
    let toml_str = r#"
[drivers.bare]
max_speed = 100
modes = ["position"]
resolutions = []
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::NoResolutions(_)))
    ));
}

/// Test that acceleration is dropped from the advertised modes.
#[test]
fn test_acceleration_mode_dropped() {
    let toml_str = r#"
[drivers.ramp]
max_speed = 100
modes = ["velocity", "acceleration"]
resolutions = [1]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
    let caps = config.driver("ramp").unwrap().capabilities();
    assert!(!caps.supports_mode(OperationMode::Acceleration));
}

/// Test validation fails for a motor on an unknown driver.
#[test]
fn test_motor_invalid_driver_reference() {
    let config = parse(
        r#"
[motors.tilt]
driver = "ghost"
output = 0
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::DriverNotFound(_)))
    ));
}

/// Test validation fails for a motor on an output the driver lacks.
#[test]
fn test_motor_invalid_output() {
    let config = parse(
        r#"
[motors.tilt]
driver = "tmc"
output = 5
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::MotorIndexOutOfRange { index: 5, .. }))
    ));
}

/// Test validation fails for a preset referencing a non-existent motor.
#[test]
fn test_preset_invalid_motor_reference() {
    let config = parse(
        r#"
[presets.bad_ref]
motor = "nonexistent_motor"
type = "stop"
resolution = 1
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::MotorNotFound(_)))
    ));
}

/// Test validation fails for a preset missing a required field.
#[test]
fn test_preset_missing_field() {
    let config = parse(
        r#"
[presets.step]
motor = "pan"
type = "positioning"
resolution = 1
steps = 200
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::MissingActionField {
            field: "velocity",
            ..
        }))
    ));
}

/// Test validation fails for a preset faster than the driver.
#[test]
fn test_preset_velocity_out_of_range() {
    let config = parse(
        r#"
[presets.fast]
motor = "pan"
type = "velocity"
resolution = 1
velocity = -1001
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::RejectedPreset {
            reason: ValidationError::VelocityOutOfRange {
                requested: 1001,
                max: 1000
            },
            ..
        }))
    ));
}

/// Test validation fails for a preset using an unsupported resolution.
#[test]
fn test_preset_unsupported_resolution() {
    let config = parse(
        r#"
[presets.fine]
motor = "pan"
type = "stop"
resolution = 256
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::RejectedPreset {
            reason: ValidationError::UnsupportedResolution(_),
            ..
        }))
    ));
}

/// Test validation fails for an acceleration preset, since the mode is dropped.
#[test]
fn test_preset_acceleration_rejected() {
    let config = parse(
        r#"
[presets.ramp]
motor = "pan"
type = "acceleration"
resolution = 1
start_velocity = 0
end_velocity = 100
duration_us = 1000
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::RejectedPreset {
            reason: ValidationError::UnsupportedOperation(OperationMode::Acceleration),
            ..
        }))
    ));
}

/// Test validation fails for a smooth move without ramp time.
#[test]
fn test_preset_zero_ramp() {
    let config = parse(
        r#"
[presets.glide]
motor = "pan"
type = "smooth_positioning"
resolution = 16
steps = 100
max_velocity = 500
acceleration_time_us = 0
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::RejectedPreset {
            reason: ValidationError::InvalidRampParameters { .. },
            ..
        }))
    ));
}
