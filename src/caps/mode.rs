//! Operation modes a driver can advertise.

use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use serde::Deserialize;

/// A single stepper operation mode.
///
/// Every motion command maps to exactly one mode, see
/// [`Motion::mode`](crate::action::Motion::mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum OperationMode {
    /// Step-precise relative moves at constant velocity.
    Position,
    /// Free running at a given velocity.
    Velocity,
    /// Constant acceleration between two velocities.
    ///
    /// Recognized but not executed by any backend yet.
    Acceleration,
    /// Step-precise relative moves with acceleration and deceleration ramps.
    PositionSmooth,
}

impl OperationMode {
    /// All modes, in bit order.
    pub const ALL: [OperationMode; 4] = [
        OperationMode::Position,
        OperationMode::Velocity,
        OperationMode::Acceleration,
        OperationMode::PositionSmooth,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            OperationMode::Position => 1 << 0,
            OperationMode::Velocity => 1 << 1,
            OperationMode::Acceleration => 1 << 2,
            OperationMode::PositionSmooth => 1 << 3,
        }
    }

    /// Configuration name of this mode.
    pub const fn name(self) -> &'static str {
        match self {
            OperationMode::Position => "position",
            OperationMode::Velocity => "velocity",
            OperationMode::Acceleration => "acceleration",
            OperationMode::PositionSmooth => "position_smooth",
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of operation modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OperationModes(u8);

impl OperationModes {
    const MASK: u8 = 0b1111;

    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every known mode, including [`OperationMode::Acceleration`].
    pub const fn all() -> Self {
        Self(Self::MASK)
    }

    /// Build a set from raw bits, dropping unknown bits.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Raw bit representation.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Set with a single mode.
    pub const fn only(mode: OperationMode) -> Self {
        Self(mode.bit())
    }

    /// Return a copy with `mode` added.
    pub const fn with(self, mode: OperationMode) -> Self {
        Self(self.0 | mode.bit())
    }

    /// Return a copy with `mode` removed.
    pub const fn without(self, mode: OperationMode) -> Self {
        Self(self.0 & !mode.bit())
    }

    /// Add a mode to the set.
    pub fn insert(&mut self, mode: OperationMode) {
        self.0 |= mode.bit();
    }

    /// Remove a mode from the set.
    pub fn remove(&mut self, mode: OperationMode) {
        self.0 &= !mode.bit();
    }

    /// Check membership.
    #[inline]
    pub const fn contains(self, mode: OperationMode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// True when no mode is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of modes in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the modes in bit order.
    pub fn iter(self) -> impl Iterator<Item = OperationMode> {
        OperationMode::ALL
            .into_iter()
            .filter(move |m| self.contains(*m))
    }
}

impl From<OperationMode> for OperationModes {
    fn from(mode: OperationMode) -> Self {
        Self::only(mode)
    }
}

impl BitOr for OperationModes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<OperationMode> for OperationModes {
    type Output = Self;

    fn bitor(self, rhs: OperationMode) -> Self::Output {
        self.with(rhs)
    }
}

impl BitOr for OperationMode {
    type Output = OperationModes;

    fn bitor(self, rhs: Self) -> Self::Output {
        OperationModes::only(self).with(rhs)
    }
}

impl BitOrAssign<OperationMode> for OperationModes {
    fn bitor_assign(&mut self, rhs: OperationMode) {
        self.insert(rhs);
    }
}

impl FromIterator<OperationMode> for OperationModes {
    fn from_iter<I: IntoIterator<Item = OperationMode>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}
