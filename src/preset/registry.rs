//! Preset registry for named action lookup.

use heapless::{FnvIndexMap, String};

use crate::action::Action;
use crate::config::SystemConfig;
use crate::error::{name_of, ConfigError, Error, Result};

/// Maximum number of presets in the registry.
pub const MAX_PRESETS: usize = 64;

/// An action bound to a driver output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    driver: String<32>,
    output: u8,
    action: Action,
}

impl Preset {
    /// Create a preset for `output` on the driver called `driver`.
    pub fn new(driver: &str, output: u8, action: Action) -> Self {
        Self {
            driver: name_of(driver),
            output,
            action,
        }
    }

    /// Name of the driver this preset runs on.
    pub fn driver(&self) -> &str {
        self.driver.as_str()
    }

    /// Motor output index on that driver.
    pub fn output(&self) -> u8 {
        self.output
    }

    /// The action to issue.
    pub fn action(&self) -> &Action {
        &self.action
    }
}

/// Registry for named presets.
#[derive(Debug, Default)]
pub struct PresetRegistry {
    presets: FnvIndexMap<String<32>, Preset, MAX_PRESETS>,
}

impl PresetRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            presets: FnvIndexMap::new(),
        }
    }

    /// Build a registry from every preset in a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a preset references an unknown motor or lacks
    /// the fields its action type needs.
    pub fn from_config(config: &SystemConfig) -> Result<Self> {
        let mut registry = Self::new();

        for (name, preset) in config.presets.iter() {
            let spec = config
                .motor(preset.motor.as_str())
                .ok_or_else(|| Error::Config(ConfigError::MotorNotFound(preset.motor.clone())))?;

            let action = preset.to_action(name.as_str())?;
            registry.register(
                name.as_str(),
                Preset::new(spec.driver.as_str(), spec.output, action),
            )?;
        }

        debug!("loaded {} presets", registry.len());
        Ok(registry)
    }

    /// Register a preset under a name, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry is full.
    pub fn register(&mut self, name: &str, preset: Preset) -> Result<()> {
        self.presets
            .insert(name_of(name), preset)
            .map_err(|_| Error::Config(ConfigError::CapacityExceeded("presets")))?;
        Ok(())
    }

    /// Get a preset by name.
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a preset by name, failing with [`ConfigError::PresetNotFound`].
    pub fn get_or_error(&self, name: &str) -> Result<&Preset> {
        self.get(name)
            .ok_or_else(|| Error::Config(ConfigError::PresetNotFound(name_of(name))))
    }

    /// Check if a preset exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get the number of registered presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Get an iterator over preset names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(|s| s.as_str())
    }

    /// Get an iterator over presets.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Preset)> {
        self.presets.iter().map(|(k, v)| (k.as_str(), v))
    }
}
