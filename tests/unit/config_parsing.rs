//! Unit tests for TOML configuration parsing.

use stepper_api::config::{ActionType, SystemConfig};
use stepper_api::{OperationMode, Resolution};

/// Test parsing a driver with its capability lists.
#[test]
fn test_parse_driver_capabilities() {
    let toml_str = r#"
[drivers.drv8825]
max_speed = 2000
modes = ["position", "velocity", "position_smooth"]
resolutions = [1, 2, 4, 8, 16, 32]
motors = [
    { index = 0, steps_per_turn = 200 },
    { index = 1, steps_per_turn = 400 },
]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let driver = config.driver("drv8825").expect("Driver not found");

    assert_eq!(driver.max_speed, 2000);
    assert_eq!(driver.modes.len(), 3);
    assert_eq!(driver.resolutions.len(), 6);

    let caps = driver.capabilities();
    assert!(caps.supports_mode(OperationMode::PositionSmooth));
    assert!(!caps.supports_mode(OperationMode::Acceleration));
    assert!(caps.supports_resolution(Resolution::ThirtySecond));
    assert!(!caps.supports_resolution(Resolution::SixtyFourth));

    let registry = driver.registry();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.get(1).map(|m| m.steps_per_turn), Some(400));
}

/// Test that motors default to an empty list.
#[test]
fn test_parse_driver_without_motors() {
    let toml_str = r#"
[drivers.empty]
max_speed = 100
modes = ["velocity"]
resolutions = [1]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(config.driver("empty").unwrap().motors.is_empty());
}

/// Test parsing named motors.
#[test]
fn test_parse_motor_spec() {
    let toml_str = r#"
[drivers.tmc]
max_speed = 1000
modes = ["position"]
resolutions = [1]
motors = [{ index = 0, steps_per_turn = 200 }]

[motors.pan]
driver = "tmc"
output = 0
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let motor = config.motor("pan").expect("Motor not found");
    assert_eq!(motor.driver.as_str(), "tmc");
    assert_eq!(motor.output, 0);

    let props = config.motor_properties("pan").expect("Output not found");
    assert_eq!(props.steps_per_turn, 200);
    assert!(config.motor_properties("tilt").is_none());
}

/// Test parsing each preset type.
#[test]
fn test_parse_preset_types() {
    let toml_str = r#"
[presets.step]
motor = "pan"
type = "positioning"
resolution = 4
velocity = -200
steps = 800

[presets.spin]
motor = "pan"
type = "velocity"
resolution = 1
velocity = 300
duration_us = 500000

[presets.ramp]
motor = "pan"
type = "acceleration"
resolution = 1
start_velocity = 0
end_velocity = 400
duration_us = 1000000

[presets.glide]
motor = "pan"
type = "smooth_positioning"
resolution = 16
steps = -1600
max_velocity = 800
acceleration_time_us = 250000

[presets.halt]
motor = "pan"
type = "stop"
resolution = 1
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(config.presets.len(), 5);

    let step = config.preset("step").unwrap();
    assert_eq!(step.kind, ActionType::Positioning);
    assert_eq!(step.resolution, Resolution::Quarter);
    assert_eq!(step.velocity, Some(-200));
    assert_eq!(step.steps, Some(800));

    assert_eq!(config.preset("ramp").unwrap().kind, ActionType::Acceleration);
    assert_eq!(
        config.preset("glide").unwrap().acceleration_time_us,
        Some(250_000)
    );
    assert_eq!(config.preset("halt").unwrap().kind, ActionType::Stop);

    let names: Vec<&str> = config.preset_names().collect();
    assert!(names.contains(&"glide"));
}

/// Test that resolution factors must be powers of two up to 256.
#[test]
fn test_parse_invalid_resolution_factor() {
    let toml_str = r#"
[drivers.bad]
max_speed = 100
modes = ["position"]
resolutions = [1, 512]
"#;

    assert!(toml::from_str::<SystemConfig>(toml_str).is_err());
}

/// Test that unknown operation modes are rejected.
#[test]
fn test_parse_invalid_mode() {
    let toml_str = r#"
[drivers.bad]
max_speed = 100
modes = ["teleport"]
resolutions = [1]
"#;

    assert!(toml::from_str::<SystemConfig>(toml_str).is_err());
}

/// Test that an unknown preset type is rejected.
#[test]
fn test_parse_invalid_preset_type() {
    let toml_str = r#"
[presets.bad]
motor = "pan"
type = "jump"
resolution = 1
"#;

    assert!(toml::from_str::<SystemConfig>(toml_str).is_err());
}

/// Test that an empty document yields an empty configuration.
#[test]
fn test_parse_empty_config() {
    let config: SystemConfig = toml::from_str("").expect("Failed to parse TOML");
    assert!(config.drivers.is_empty());
    assert!(config.motors.is_empty());
    assert!(config.presets.is_empty());
}
