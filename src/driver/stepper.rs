//! Stepper driver facade.
//!
//! Wraps a backend with its capability descriptor and motor table, and runs
//! every command through the validation engine before the backend sees it.

use heapless::String;

use crate::action::Action;
use crate::caps::{Capabilities, MotorProperties, MotorRegistry};
use crate::error::{ConfigError, Error, Result, ValidationError};
use crate::preset::PresetRegistry;
use crate::validation::{self, ApprovedAction};

use super::backend::StepperBackend;
use super::builder::StepperDriverBuilder;
use super::handle::MotorHandle;

/// A driver instance: configuration plus backend.
///
/// Generic over:
/// - `B`: the backend executing validated commands
pub struct StepperDriver<B>
where
    B: StepperBackend,
{
    /// Driver name for logging and preset binding.
    name: String<32>,

    /// What this driver supports.
    capabilities: Capabilities,

    /// Motors attached to this driver.
    registry: MotorRegistry,

    /// Backend executing commands.
    backend: B,
}

impl<B> StepperDriver<B>
where
    B: StepperBackend,
{
    /// Start building a driver.
    pub fn builder() -> StepperDriverBuilder<B> {
        StepperDriverBuilder::new()
    }

    pub(crate) fn new(
        name: String<32>,
        capabilities: Capabilities,
        registry: MotorRegistry,
        backend: B,
    ) -> Self {
        Self {
            name,
            capabilities,
            registry,
            backend,
        }
    }

    /// Get the driver name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the capability descriptor.
    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Get the motor table.
    #[inline]
    pub fn registry(&self) -> &MotorRegistry {
        &self.registry
    }

    /// Number of motors this driver manages.
    #[inline]
    pub fn n_motors(&self) -> usize {
        self.registry.len()
    }

    /// Properties of the motor on output `index`, if any.
    pub fn motor_props(&self, index: u8) -> Option<&MotorProperties> {
        self.registry.get(index)
    }

    /// Borrow the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Borrow the backend mutably.
    ///
    /// Commands issued directly on the backend bypass validation.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consume the driver and return its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Turn on the coil current of `motor`.
    ///
    /// # Errors
    ///
    /// `ValidationError::NoSuchMotor` for an invalid index, otherwise
    /// whatever the backend reports.
    pub fn enable(&mut self, motor: u8) -> Result<()> {
        validation::check_motor(&self.registry, motor)?;
        debug!("enable motor {}", motor);
        self.backend.enable(motor)?;
        Ok(())
    }

    /// Turn off the coil current of `motor`.
    ///
    /// # Errors
    ///
    /// `ValidationError::NoSuchMotor` for an invalid index, otherwise
    /// whatever the backend reports.
    pub fn disable(&mut self, motor: u8) -> Result<()> {
        validation::check_motor(&self.registry, motor)?;
        debug!("disable motor {}", motor);
        self.backend.disable(motor)?;
        Ok(())
    }

    /// Validate `action` without executing it.
    pub fn validate(
        &self,
        motor: u8,
        action: &Action,
    ) -> core::result::Result<ApprovedAction, ValidationError> {
        validation::validate(&self.capabilities, &self.registry, motor, action)
    }

    /// Validate `action` and hand it to the backend.
    ///
    /// May block for bounded actions, depending on the backend.
    ///
    /// # Errors
    ///
    /// `Error::Validation` if the action is rejected (the backend is not
    /// called), `Error::Backend` if the backend fails.
    pub fn move_motor(&mut self, motor: u8, action: &Action) -> Result<()> {
        let command = self.validate(motor, action)?;
        debug!("move motor {}: {}", motor, command.motion().mode());
        self.backend.move_motor(&command)?;
        Ok(())
    }

    /// Get a handle to a single motor.
    ///
    /// # Errors
    ///
    /// `ValidationError::NoSuchMotor` if `index` is out of range or has no
    /// entry in the motor table.
    pub fn motor(&mut self, index: u8) -> Result<MotorHandle<'_, B>> {
        validation::check_motor(&self.registry, index)?;
        let properties = *self
            .registry
            .get(index)
            .ok_or(ValidationError::NoSuchMotor(index))?;
        Ok(MotorHandle::new(self, properties))
    }

    /// Execute a named preset from a registry.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The preset is not found in the registry
    /// - The preset is bound to a different driver
    /// - The action fails validation or the backend fails
    pub fn execute(&mut self, preset_name: &str, registry: &PresetRegistry) -> Result<()> {
        let preset = registry.get_or_error(preset_name)?;

        if preset.driver() != self.name.as_str() {
            return Err(Error::Config(ConfigError::WrongDriver {
                preset: crate::error::name_of(preset_name),
                driver: crate::error::name_of(preset.driver()),
            }));
        }

        self.move_motor(preset.output(), preset.action())
    }
}
