//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::caps::MotorProperties;

use super::driver::DriverConfig;
use super::motor::MotorSpec;
use super::preset::PresetConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemConfig {
    /// Named driver instances.
    #[serde(default)]
    pub drivers: FnvIndexMap<String<32>, DriverConfig, 8>,

    /// Named motors, each bound to a driver output.
    #[serde(default)]
    pub motors: FnvIndexMap<String<32>, MotorSpec, 32>,

    /// Named action presets.
    #[serde(default)]
    pub presets: FnvIndexMap<String<32>, PresetConfig, 64>,
}

impl SystemConfig {
    /// Get a driver configuration by name.
    pub fn driver(&self, name: &str) -> Option<&DriverConfig> {
        self.drivers
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a motor reference by name.
    pub fn motor(&self, name: &str) -> Option<&MotorSpec> {
        self.motors
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a preset by name.
    pub fn preset(&self, name: &str) -> Option<&PresetConfig> {
        self.presets
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Resolve a named motor to its driver output properties.
    ///
    /// Returns `None` if the motor, its driver, or the output is unknown.
    pub fn motor_properties(&self, name: &str) -> Option<MotorProperties> {
        let spec = self.motor(name)?;
        self.driver(spec.driver.as_str())?
            .motors
            .iter()
            .find(|m| m.index == spec.output)
            .copied()
    }

    /// List all driver names.
    pub fn driver_names(&self) -> impl Iterator<Item = &str> {
        self.drivers.keys().map(|s| s.as_str())
    }

    /// List all motor names.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.motors.keys().map(|s| s.as_str())
    }

    /// List all preset names.
    pub fn preset_names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(|s| s.as_str())
    }
}
