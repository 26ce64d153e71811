//! Microstep resolutions.
//!
//! A [`Resolution`] is a single subdivision factor; [`Resolutions`] is a set of
//! them. Drivers advertise a set, actions must name exactly one member.

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign};

use serde::Deserialize;

use crate::error::ConfigError;

/// Microstep subdivision factor (1, 2, 4, 8, 16, 32, 64, 128, 256).
///
/// Each variant occupies one bit of a [`Resolutions`] set, bit `n` standing
/// for a factor of `2^n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Resolution {
    /// Full step (no microstepping).
    Full = 0,
    /// Half step.
    Half = 1,
    /// Quarter step.
    Quarter = 2,
    /// Eighth step.
    Eighth = 3,
    /// Sixteenth step.
    Sixteenth = 4,
    /// Thirty-second step.
    ThirtySecond = 5,
    /// Sixty-fourth step.
    SixtyFourth = 6,
    /// 128th step.
    OneTwentyEighth = 7,
    /// 256th step (maximum resolution).
    TwoFiftySixth = 8,
}

impl Resolution {
    /// All resolutions, coarsest first.
    pub const ALL: [Resolution; 9] = [
        Resolution::Full,
        Resolution::Half,
        Resolution::Quarter,
        Resolution::Eighth,
        Resolution::Sixteenth,
        Resolution::ThirtySecond,
        Resolution::SixtyFourth,
        Resolution::OneTwentyEighth,
        Resolution::TwoFiftySixth,
    ];

    /// Create from a subdivision factor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidResolution` unless `factor` is a power of
    /// two between 1 and 256.
    pub fn from_factor(factor: u16) -> Result<Self, ConfigError> {
        if !factor.is_power_of_two() || factor > 256 {
            return Err(ConfigError::InvalidResolution(factor));
        }
        Ok(Self::ALL[factor.trailing_zeros() as usize])
    }

    /// Microsteps per full step.
    #[inline]
    pub const fn factor(self) -> u16 {
        1 << (self as u8)
    }

    #[inline]
    const fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1/{}", self.factor())
    }
}

impl TryFrom<u16> for Resolution {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_factor(value)
    }
}

impl<'de> Deserialize<'de> for Resolution {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        Resolution::from_factor(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}

/// Set of microstep resolutions.
///
/// Used both for what a driver supports and for what an action requests. An
/// action is only executable when its set holds exactly one resolution, see
/// [`Resolutions::single`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolutions(u16);

impl Resolutions {
    const MASK: u16 = 0x01ff;

    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every resolution from 1 to 256.
    pub const fn all() -> Self {
        Self(Self::MASK)
    }

    /// Build a set from raw bits, dropping bits above 256.
    pub const fn from_bits_truncate(bits: u16) -> Self {
        Self(bits & Self::MASK)
    }

    /// Raw bit representation.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Set with a single resolution.
    pub const fn only(resolution: Resolution) -> Self {
        Self(resolution.bit())
    }

    /// Return a copy with `resolution` added.
    pub const fn with(self, resolution: Resolution) -> Self {
        Self(self.0 | resolution.bit())
    }

    /// Add a resolution to the set.
    pub fn insert(&mut self, resolution: Resolution) {
        self.0 |= resolution.bit();
    }

    /// Check membership.
    #[inline]
    pub const fn contains(self, resolution: Resolution) -> bool {
        self.0 & resolution.bit() != 0
    }

    /// True when both sets share at least one resolution.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// True when no resolution is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of resolutions in the set.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// The only member, if the set holds exactly one resolution.
    pub fn single(self) -> Option<Resolution> {
        if self.0.is_power_of_two() {
            Some(Resolution::ALL[self.0.trailing_zeros() as usize])
        } else {
            None
        }
    }

    /// Coarsest resolution in the set.
    pub fn coarsest(self) -> Option<Resolution> {
        self.iter().next()
    }

    /// Iterate members, coarsest first.
    pub fn iter(self) -> impl Iterator<Item = Resolution> {
        Resolution::ALL
            .into_iter()
            .filter(move |r| self.contains(*r))
    }
}

impl From<Resolution> for Resolutions {
    fn from(resolution: Resolution) -> Self {
        Self::only(resolution)
    }
}

impl BitOr for Resolutions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Resolution> for Resolutions {
    type Output = Self;

    fn bitor(self, rhs: Resolution) -> Self::Output {
        self.with(rhs)
    }
}

impl BitOr for Resolution {
    type Output = Resolutions;

    fn bitor(self, rhs: Self) -> Self::Output {
        Resolutions::only(self).with(rhs)
    }
}

impl BitOrAssign<Resolution> for Resolutions {
    fn bitor_assign(&mut self, rhs: Resolution) {
        self.insert(rhs);
    }
}

impl BitAnd for Resolutions {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl FromIterator<Resolution> for Resolutions {
    fn from_iter<I: IntoIterator<Item = Resolution>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl fmt::Display for Resolutions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, r) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", r.factor())?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_factors() {
        for r in Resolution::ALL {
            assert_eq!(Resolution::from_factor(r.factor()), Ok(r));
        }
        assert_eq!(Resolution::Sixteenth.factor(), 16);
        assert_eq!(Resolution::TwoFiftySixth.factor(), 256);
    }

    #[test]
    fn test_invalid_factors() {
        assert!(Resolution::from_factor(0).is_err());
        assert!(Resolution::from_factor(3).is_err());
        assert!(Resolution::from_factor(12).is_err());
        assert!(Resolution::from_factor(512).is_err());
    }

    #[test]
    fn test_single_requires_exactly_one_bit() {
        assert_eq!(Resolutions::empty().single(), None);
        assert_eq!(
            Resolutions::only(Resolution::Quarter).single(),
            Some(Resolution::Quarter)
        );
        assert_eq!((Resolution::Full | Resolution::Half).single(), None);
    }

    #[test]
    fn test_intersection() {
        let supported = Resolution::Full | Resolution::Half | Resolution::Quarter;
        assert!(supported.intersects(Resolutions::only(Resolution::Half)));
        assert!(!supported.intersects(Resolutions::only(Resolution::Sixteenth)));
        assert_eq!(
            supported & (Resolution::Half | Resolution::Eighth),
            Resolutions::only(Resolution::Half)
        );
    }

    #[test]
    fn test_truncate_drops_unknown_bits() {
        assert_eq!(Resolutions::from_bits_truncate(0xffff), Resolutions::all());
        assert_eq!(Resolutions::all().len(), 9);
    }

    #[test]
    fn test_coarsest() {
        let set = Resolution::Sixteenth | Resolution::Quarter;
        assert_eq!(set.coarsest(), Some(Resolution::Quarter));
        assert_eq!(Resolutions::empty().coarsest(), None);
    }
}
