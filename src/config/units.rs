//! Unit types for physical quantities.
//!
//! Everything is integer: the controller runs on targets without an FPU and
//! its timing arithmetic is fixed-point.

use core::ops::Neg;

use serde::Deserialize;

/// Signed angular speed in whole degrees per second.
///
/// The sign selects the rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct DegreesPerSec(pub i32);

impl DegreesPerSec {
    /// Create a new DegreesPerSec value.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Speed magnitude, ignoring direction.
    #[inline]
    pub const fn magnitude(self) -> u32 {
        self.0.unsigned_abs()
    }
}

/// Motor position in micro-steps from the home reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Steps(pub i32);

impl Steps {
    /// Create a new Steps value.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Distance between two positions.
    #[inline]
    pub const fn distance_to(self, other: Steps) -> u32 {
        other.0.abs_diff(self.0)
    }
}

impl Neg for Steps {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_magnitude() {
        assert_eq!(DegreesPerSec(-90).magnitude(), 90);
        assert_eq!(DegreesPerSec(i32::MIN).magnitude(), 2_147_483_648);
    }

    #[test]
    fn test_steps_distance() {
        assert_eq!(Steps(-12).distance_to(Steps(500)), 512);
        assert_eq!(Steps(500).distance_to(Steps(500)), 0);
        assert_eq!(-Steps(25), Steps(-25));
    }
}
