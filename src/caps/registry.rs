//! Static motor properties attached to a driver instance.

use heapless::Vec;
use serde::Deserialize;

/// Maximum number of motor outputs per driver instance.
pub const MAX_MOTORS: usize = 16;

/// Characteristic properties of one motor connected to a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorProperties {
    /// Driver output this motor is connected to.
    pub index: u8,

    /// Full steps for one turn of the motor shaft (typically 200 for 1.8° motors).
    pub steps_per_turn: u32,
}

impl MotorProperties {
    /// Create motor properties.
    pub const fn new(index: u8, steps_per_turn: u32) -> Self {
        Self {
            index,
            steps_per_turn,
        }
    }

    /// Full steps per degree of shaft rotation.
    #[inline]
    pub fn steps_per_degree(&self) -> f32 {
        self.steps_per_turn as f32 / 360.0
    }

    /// Convert a shaft angle to the nearest whole number of full steps.
    pub fn degrees_to_steps(&self, degrees: f32) -> i32 {
        libm::roundf(degrees * self.steps_per_degree()) as i32
    }

    /// Convert full steps to a shaft angle.
    pub fn steps_to_degrees(&self, steps: i64) -> f32 {
        if self.steps_per_turn == 0 {
            return 0.0;
        }
        steps as f32 / self.steps_per_degree()
    }
}

/// Ordered table of the motors attached to one driver instance.
///
/// Output indices are expected to be unique and below [`len`](Self::len);
/// the driver builder and the configuration loader enforce it, this type
/// does not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotorRegistry {
    motors: Vec<MotorProperties, MAX_MOTORS>,
}

impl MotorRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self { motors: Vec::new() }
    }

    /// Build a registry from a slice of properties.
    ///
    /// Returns `None` if more than [`MAX_MOTORS`] entries are given.
    pub fn from_slice(motors: &[MotorProperties]) -> Option<Self> {
        Vec::from_slice(motors).ok().map(|motors| Self { motors })
    }

    /// Append a motor.
    ///
    /// Hands the entry back if the registry is full.
    pub fn push(&mut self, motor: MotorProperties) -> Result<(), MotorProperties> {
        self.motors.push(motor)
    }

    /// Number of motors this driver manages.
    #[inline]
    pub fn len(&self) -> usize {
        self.motors.len()
    }

    /// True when no motor is attached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.motors.is_empty()
    }

    /// True when `motor` is a valid index for this driver.
    #[inline]
    pub fn in_range(&self, motor: u8) -> bool {
        usize::from(motor) < self.motors.len()
    }

    /// Look up a motor by output index.
    pub fn get(&self, index: u8) -> Option<&MotorProperties> {
        self.motors.iter().find(|m| m.index == index)
    }

    /// All motors in table order.
    pub fn as_slice(&self) -> &[MotorProperties] {
        &self.motors
    }

    /// Iterate over all motors in table order.
    pub fn iter(&self) -> impl Iterator<Item = &MotorProperties> {
        self.motors.iter()
    }
}

impl<'a> IntoIterator for &'a MotorRegistry {
    type Item = &'a MotorProperties;
    type IntoIter = core::slice::Iter<'a, MotorProperties>;

    fn into_iter(self) -> Self::IntoIter {
        self.motors.iter()
    }
}
