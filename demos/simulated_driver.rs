//! Simulated driver example.
//!
//! Demonstrates building a driver programmatically, validating actions
//! against its capabilities, and executing them on the simulated backend.
//!
//! Run with: `cargo run --example simulated_driver`

use stepper_api::{
    Action, OperationMode, Resolution, Resolutions, SimulatedBackend, StepperDriver,
};

/// Delay that sleeps for real, so bounded moves take wall-clock time.
struct SleepDelay;

impl embedded_hal::delay::DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

fn main() -> stepper_api::Result<()> {
    println!("=== Simulated Driver Example ===\n");

    let mut driver = StepperDriver::builder()
        .name("demo")
        .max_speed(1000)
        .mode(OperationMode::Position)
        .mode(OperationMode::Velocity)
        .mode(OperationMode::PositionSmooth)
        .resolution(Resolution::Full)
        .resolution(Resolution::Sixteenth)
        .motor(0, 200)
        .motor(1, 400)
        .backend(SimulatedBackend::new(2, SleepDelay))
        .build()?;

    let caps = driver.capabilities();
    println!("Driver '{}':", driver.name());
    println!("  Max speed: {} full steps/s", caps.max_speed());
    println!(
        "  Modes: {}",
        caps.modes()
            .iter()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Resolutions: {}", caps.resolutions());
    println!("  Motors: {}", driver.n_motors());
    println!();

    // Actions that fail validation never reach the backend
    let rejected = [
        ("too fast", 0, Action::velocity(1500, 0, Resolution::Full)),
        ("no such motor", 3, Action::STOP),
        (
            "ambiguous resolution",
            0,
            Action::positioning(100, 10, Resolution::Full)
                .with_resolutions(Resolution::Full | Resolution::Sixteenth),
        ),
        (
            "no resolution",
            0,
            Action::STOP.with_resolutions(Resolutions::empty()),
        ),
        (
            "acceleration",
            0,
            Action::acceleration(0, 500, 100_000, Resolution::Full),
        ),
    ];

    println!("Rejected actions:");
    for (label, motor, action) in &rejected {
        match driver.validate(*motor, action) {
            Ok(_) => println!("  - {}: unexpectedly approved", label),
            Err(e) => println!("  - {}: {}", label, e),
        }
    }
    println!();

    driver.enable(0)?;
    driver.enable(1)?;

    println!("Executing:");
    driver.move_motor(0, &Action::positioning(500, 100, Resolution::Sixteenth))?;
    println!("  motor 0 moved 100 steps at 1/16");

    driver.move_motor(
        1,
        &Action::smooth_positioning(-400, 800, 200_000, Resolution::Full),
    )?;
    println!("  motor 1 moved one turn back with ramps");

    driver.move_motor(0, &Action::velocity(-250, 0, Resolution::Full))?;
    println!("  motor 0 running at -250 steps/s");

    {
        let mut motor = driver.motor(0)?;
        motor.stop()?;
        motor.rotate_degrees(90.0, 400)?;
        println!("  motor 0 stopped, then turned 90 degrees");
    }
    println!();

    println!("Final state:");
    for index in 0..2u8 {
        if let Some(state) = driver.backend().motor(index) {
            println!(
                "  motor {}: position {} steps, velocity {}, {} commands",
                index, state.position, state.velocity, state.commands
            );
        }
    }

    driver.disable(0)?;
    driver.disable(1)?;

    Ok(())
}
