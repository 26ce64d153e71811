//! Builder pattern for StepperDriver.

use heapless::String;

use crate::caps::{
    Capabilities, MotorProperties, MotorRegistry, OperationMode, OperationModes, Resolution,
    Resolutions,
};
use crate::config::{check_motor_table, DriverConfig, SystemConfig};
use crate::error::{name_of, ConfigError, Error, Result};

use super::backend::StepperBackend;
use super::stepper::StepperDriver;

/// Builder for creating StepperDriver instances.
pub struct StepperDriverBuilder<B>
where
    B: StepperBackend,
{
    backend: Option<B>,
    name: Option<String<32>>,
    max_speed: Option<u32>,
    modes: OperationModes,
    resolutions: Resolutions,
    registry: MotorRegistry,
    overflowed: bool,
}

impl<B> Default for StepperDriverBuilder<B>
where
    B: StepperBackend,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<B> StepperDriverBuilder<B>
where
    B: StepperBackend,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            backend: None,
            name: None,
            max_speed: None,
            modes: OperationModes::empty(),
            resolutions: Resolutions::empty(),
            registry: MotorRegistry::new(),
            overflowed: false,
        }
    }

    /// Set the backend.
    pub fn backend(mut self, backend: B) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the driver name, truncated to 32 bytes.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name_of(name));
        self
    }

    /// Set the highest full-step speed.
    pub fn max_speed(mut self, max_speed: u32) -> Self {
        self.max_speed = Some(max_speed);
        self
    }

    /// Add a supported operation mode.
    pub fn mode(mut self, mode: OperationMode) -> Self {
        self.modes.insert(mode);
        self
    }

    /// Replace the supported operation modes.
    pub fn modes(mut self, modes: OperationModes) -> Self {
        self.modes = modes;
        self
    }

    /// Add a supported microstep resolution.
    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolutions.insert(resolution);
        self
    }

    /// Replace the supported microstep resolutions.
    pub fn resolutions(mut self, resolutions: Resolutions) -> Self {
        self.resolutions = resolutions;
        self
    }

    /// Attach a motor to output `index`.
    pub fn motor(mut self, index: u8, steps_per_turn: u32) -> Self {
        if self
            .registry
            .push(MotorProperties::new(index, steps_per_turn))
            .is_err()
        {
            self.overflowed = true;
        }
        self
    }

    /// Use a complete capability descriptor.
    pub fn capabilities(mut self, caps: Capabilities) -> Self {
        self.max_speed = Some(caps.max_speed());
        self.modes = caps.modes();
        self.resolutions = caps.resolutions();
        self
    }

    /// Use a complete motor table.
    pub fn registry(mut self, registry: MotorRegistry) -> Self {
        self.registry = registry;
        self.overflowed = false;
        self
    }

    /// Configure from a DriverConfig.
    pub fn from_driver_config(self, name: &str, config: &DriverConfig) -> Self {
        self.name(name)
            .capabilities(config.capabilities())
            .registry(config.registry())
    }

    /// Configure from SystemConfig by driver name.
    pub fn from_config(self, config: &SystemConfig, driver_name: &str) -> Result<Self> {
        let driver_config = config.driver(driver_name).ok_or_else(|| {
            Error::Config(ConfigError::DriverNotFound(name_of(driver_name)))
        })?;

        Ok(self.from_driver_config(driver_name, driver_config))
    }

    /// Build the StepperDriver.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend or maximum speed is missing, if more
    /// motors were added than a registry can hold, or if the motor table has
    /// duplicate or out-of-range indices or a zero step count.
    pub fn build(self) -> Result<StepperDriver<B>> {
        let backend = self
            .backend
            .ok_or(Error::Config(ConfigError::MissingField("backend")))?;

        let max_speed = self
            .max_speed
            .ok_or(Error::Config(ConfigError::MissingField("max_speed")))?;

        if self.overflowed {
            return Err(Error::Config(ConfigError::CapacityExceeded("motors")));
        }

        let name = self.name.unwrap_or_else(|| name_of("stepper"));

        check_motor_table(name.as_str(), self.registry.as_slice())?;

        let capabilities = Capabilities::new(max_speed, self.modes, self.resolutions);

        Ok(StepperDriver::new(name, capabilities, self.registry, backend))
    }
}
