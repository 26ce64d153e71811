//! Example: Configuration-driven preset execution.
//!
//! This example demonstrates how to:
//! - Load driver, motor and preset configuration from TOML
//! - Build a driver per configured driver entry
//! - Use the PresetRegistry for named lookups
//!
//! Run with: `cargo run --example config_driven --features std`

use stepper_api::{
    error::Result, parse_config, PresetRegistry, SimulatedBackend, StepperDriver,
};

/// Mock delay for demonstration.
struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // In real code, this would actually delay
    }
}

fn main() -> Result<()> {
    println!("=== Configuration-Driven Preset Example ===\n");

    let toml_content = r#"
[drivers.gantry]
max_speed = 1200
modes = ["position", "velocity", "position_smooth", "acceleration"]
resolutions = [1, 2, 4, 8, 16]

[[drivers.gantry.motors]]
index = 0
steps_per_turn = 200

[[drivers.gantry.motors]]
index = 1
steps_per_turn = 200

[motors.x_axis]
driver = "gantry"
output = 0

[motors.y_axis]
driver = "gantry"
output = 1

[presets.x_home]
motor = "x_axis"
type = "positioning"
velocity = -600
steps = 400
resolution = 16

[presets.y_sweep]
motor = "y_axis"
type = "smooth_positioning"
steps = 2000
max_velocity = 1000
acceleration_time_us = 300000
resolution = 4

[presets.x_jog]
motor = "x_axis"
type = "velocity"
velocity = 200
duration_us = 250000
resolution = 1

[presets.x_stop]
motor = "x_axis"
type = "stop"
resolution = 1
"#;

    // Parsing also validates every preset against its driver
    let config = parse_config(toml_content)?;

    println!("Drivers:");
    for name in config.driver_names() {
        if let Some(driver) = config.driver(name) {
            let caps = driver.capabilities();
            println!(
                "  - {}: max {} steps/s, resolutions {}, {} motors",
                name,
                caps.max_speed(),
                caps.resolutions(),
                driver.motors.len()
            );
        }
    }
    println!();

    let presets = PresetRegistry::from_config(&config)?;

    println!("Available Presets:");
    for (name, preset) in presets.iter() {
        println!(
            "  - {} → {} output {} ({})",
            name,
            preset.driver(),
            preset.output(),
            preset.action().mode()
        );
    }
    println!();

    let mut driver = StepperDriver::builder()
        .from_config(&config, "gantry")?
        .backend(SimulatedBackend::new(2, MockDelay))
        .build()?;

    for index in 0..driver.n_motors() as u8 {
        driver.enable(index)?;
    }

    for name in ["x_home", "y_sweep", "x_jog", "x_stop"] {
        driver.execute(name, &presets)?;
        println!("Executed {}", name);
    }
    println!();

    for name in config.motor_names() {
        let (Some(spec), Some(props)) = (config.motor(name), config.motor_properties(name))
        else {
            continue;
        };
        if let Some(state) = driver.backend().motor(spec.output) {
            println!(
                "{}: {:.1}° from start",
                name,
                props.steps_to_degrees(state.position)
            );
        }
    }

    Ok(())
}
