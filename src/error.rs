//! Error types for stepper-api.
//!
//! Validation errors are raised before any backend call; backend errors are
//! passed through from the driver unchanged.

use core::fmt;

use crate::caps::{OperationMode, Resolutions};

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-api operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Command rejected before reaching the backend
    Validation(ValidationError),
    /// Failure reported by the driver backend
    Backend(BackendError),
}

/// Reasons a command is rejected by the validation engine.
///
/// Variants are listed in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    /// Motor index is not managed by this driver
    NoSuchMotor(u8),
    /// Driver does not support the action's operation mode
    UnsupportedOperation(OperationMode),
    /// Action carries no microstep resolution
    MissingResolution,
    /// None of the requested resolutions is supported
    UnsupportedResolution(Resolutions),
    /// More than one resolution requested
    AmbiguousResolution(Resolutions),
    /// A velocity magnitude exceeds the driver's maximum speed
    VelocityOutOfRange {
        /// Requested magnitude in full steps per second
        requested: u32,
        /// Driver maximum in full steps per second
        max: u32,
    },
    /// Smooth positioning ramp cannot be executed
    InvalidRampParameters {
        /// Requested peak velocity
        max_velocity: u32,
        /// Requested ramp time in microseconds
        acceleration_time_us: u32,
    },
}

/// Errors raised by driver backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BackendError {
    /// Bus or pin I/O failed
    Io,
    /// Motor must be enabled before it can move
    NotEnabled(u8),
    /// Motion can never complete (e.g. steps requested at zero velocity)
    Stalled(u8),
    /// Backend does not execute this operation mode
    Unsupported(OperationMode),
    /// Device-specific error code
    Device(i32),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep resolution (must be power of 2: 1, 2, 4, ... 256)
    InvalidResolution(u16),
    /// Driver name not found in configuration
    DriverNotFound(heapless::String<32>),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// Preset name not found
    PresetNotFound(heapless::String<32>),
    /// Driver maximum speed must be > 0
    InvalidMaxSpeed(heapless::String<32>),
    /// Driver supports no executable operation mode
    NoOperationModes(heapless::String<32>),
    /// Driver supports no microstep resolution
    NoResolutions(heapless::String<32>),
    /// Two motors share an output index
    DuplicateMotorIndex {
        /// Driver name
        driver: heapless::String<32>,
        /// Repeated index
        index: u8,
    },
    /// Output index does not fit the driver's motor count
    MotorIndexOutOfRange {
        /// Driver name
        driver: heapless::String<32>,
        /// Offending index
        index: u8,
        /// Number of motors on the driver
        n_motors: usize,
    },
    /// Motor steps per turn must be > 0
    InvalidStepsPerTurn {
        /// Driver name
        driver: heapless::String<32>,
        /// Motor output index
        index: u8,
    },
    /// Preset lacks a field its action type needs
    MissingActionField {
        /// Preset name
        preset: heapless::String<32>,
        /// Missing field
        field: &'static str,
    },
    /// Preset field does not fit the action's value range
    ActionFieldOutOfRange {
        /// Preset name
        preset: heapless::String<32>,
        /// Offending field
        field: &'static str,
    },
    /// Preset fails validation against its driver's capabilities
    RejectedPreset {
        /// Preset name
        preset: heapless::String<32>,
        /// Validation failure
        reason: ValidationError,
    },
    /// Preset is bound to another driver
    WrongDriver {
        /// Preset name
        preset: heapless::String<32>,
        /// Driver the preset is bound to
        driver: heapless::String<32>,
    },
    /// Required builder field not set
    MissingField(&'static str),
    /// Too many entries for a fixed-capacity table
    CapacityExceeded(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Validation(e) => write!(f, "Invalid command: {}", e),
            Error::Backend(e) => write!(f, "Backend error: {}", e),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoSuchMotor(m) => write!(f, "No such motor: {}", m),
            ValidationError::UnsupportedOperation(mode) => {
                write!(f, "Operation mode '{}' not supported", mode)
            }
            ValidationError::MissingResolution => write!(f, "No microstep resolution set"),
            ValidationError::UnsupportedResolution(r) => {
                write!(f, "Unsupported microstep resolution {}", r)
            }
            ValidationError::AmbiguousResolution(r) => {
                write!(f, "Multiple microstep resolutions set: {}", r)
            }
            ValidationError::VelocityOutOfRange { requested, max } => {
                write!(f, "Velocity {} exceeds maximum {}", requested, max)
            }
            ValidationError::InvalidRampParameters {
                max_velocity,
                acceleration_time_us,
            } => write!(
                f,
                "Invalid ramp: max velocity {} over {} us",
                max_velocity, acceleration_time_us
            ),
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Io => write!(f, "I/O operation failed"),
            BackendError::NotEnabled(m) => write!(f, "Motor {} is not enabled", m),
            BackendError::Stalled(m) => write!(f, "Motion on motor {} cannot complete", m),
            BackendError::Unsupported(mode) => {
                write!(f, "Operation mode '{}' not executed by backend", mode)
            }
            BackendError::Device(code) => write!(f, "Device error code {}", code),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidResolution(v) => write!(
                f,
                "Invalid microstep resolution: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256",
                v
            ),
            ConfigError::DriverNotFound(name) => write!(f, "Driver '{}' not found", name),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::PresetNotFound(name) => write!(f, "Preset '{}' not found", name),
            ConfigError::InvalidMaxSpeed(name) => {
                write!(f, "Driver '{}': max_speed must be > 0", name)
            }
            ConfigError::NoOperationModes(name) => {
                write!(f, "Driver '{}' supports no operation mode", name)
            }
            ConfigError::NoResolutions(name) => {
                write!(f, "Driver '{}' supports no microstep resolution", name)
            }
            ConfigError::DuplicateMotorIndex { driver, index } => {
                write!(f, "Driver '{}': duplicate motor index {}", driver, index)
            }
            ConfigError::MotorIndexOutOfRange {
                driver,
                index,
                n_motors,
            } => write!(
                f,
                "Driver '{}': motor index {} out of range for {} motors",
                driver, index, n_motors
            ),
            ConfigError::InvalidStepsPerTurn { driver, index } => write!(
                f,
                "Driver '{}': motor {} steps_per_turn must be > 0",
                driver, index
            ),
            ConfigError::MissingActionField { preset, field } => {
                write!(f, "Preset '{}' is missing '{}'", preset, field)
            }
            ConfigError::ActionFieldOutOfRange { preset, field } => {
                write!(f, "Preset '{}': '{}' out of range", preset, field)
            }
            ConfigError::RejectedPreset { preset, reason } => {
                write!(f, "Preset '{}' rejected: {}", preset, reason)
            }
            ConfigError::WrongDriver { preset, driver } => {
                write!(f, "Preset '{}' is bound to driver '{}'", preset, driver)
            }
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::CapacityExceeded(what) => write!(f, "Too many {}", what),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<BackendError> for Error {
    fn from(e: BackendError) -> Self {
        Error::Backend(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for ValidationError {}

#[cfg(feature = "std")]
impl std::error::Error for BackendError {}

/// Copy a string into a fixed-capacity buffer, truncating if needed.
pub(crate) fn truncated<const N: usize>(text: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

/// Copy a name into a fixed-capacity string, truncating if needed.
pub(crate) fn name_of(name: &str) -> heapless::String<32> {
    truncated(name)
}
