//! Travel geometry derived from motor configuration.

use crate::motion::{CoilPattern, SteppingStyle};

use super::motor::MotorConfig;
use super::units::{DegreesPerSec, Steps};

/// Pattern cycles per output shaft revolution.
///
/// A 28BYJ-48 geared stepper makes one revolution every 2048 full steps, i.e.
/// 512 passes through the 4-entry full-step table (or the 8-entry half-step
/// one, at twice the resolution).
pub const CYCLES_PER_REVOLUTION: u32 = 512;

const MICRODEGREES_PER_REVOLUTION: u32 = 360 * 1_000_000;

/// Derived travel parameters computed from motor configuration.
///
/// These are computed once at construction and never change afterwards. All
/// divisions truncate, so positions can be off by up to one micro-step
/// against the requested angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelGeometry {
    /// Coil excitation style.
    pub style: SteppingStyle,

    /// Energization table for `style`.
    pub pattern: CoilPattern,

    /// Requested travel range in degrees.
    pub max_angle_deg: u16,

    /// Upper travel bound in micro-steps (lower bound is 0).
    pub max_position: u32,

    /// Angular size of one micro-step in millionths of a degree.
    pub microdegrees_per_step: u32,
}

impl TravelGeometry {
    /// Compute geometry for a travel angle and stepping style.
    pub fn new(max_angle_deg: u16, style: SteppingStyle) -> Self {
        let pattern = style.pattern();
        let steps_per_revolution = CYCLES_PER_REVOLUTION * style.states();

        Self {
            style,
            pattern,
            max_angle_deg,
            max_position: steps_per_revolution * u32::from(max_angle_deg) / 360,
            microdegrees_per_step: MICRODEGREES_PER_REVOLUTION / steps_per_revolution,
        }
    }

    /// Compute geometry from motor configuration.
    pub fn from_config(config: &MotorConfig) -> Self {
        Self::new(config.max_angle_deg, config.stepping)
    }

    /// Micro-steps in one output revolution.
    #[inline]
    pub fn steps_per_revolution(&self) -> u32 {
        CYCLES_PER_REVOLUTION * self.pattern.len() as u32
    }

    /// Upper travel bound as a position.
    #[inline]
    pub fn max_steps(&self) -> Steps {
        Steps(i32::try_from(self.max_position).unwrap_or(i32::MAX))
    }

    /// Convert a position to microdegrees.
    #[inline]
    pub fn steps_to_microdegrees(&self, steps: Steps) -> i64 {
        i64::from(steps.0) * i64::from(self.microdegrees_per_step)
    }

    /// Delay between micro-steps for a constant angular speed.
    ///
    /// `None` for zero speed. The result is not clamped; very low speeds give
    /// very long delays.
    #[inline]
    pub fn step_delay_us(&self, speed: DegreesPerSec) -> Option<u32> {
        match speed.magnitude() {
            0 => None,
            dps => Some(self.microdegrees_per_step / dps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_step_half_turn() {
        let geometry = TravelGeometry::new(180, SteppingStyle::Full);

        // 512 * 4 * 180 / 360
        assert_eq!(geometry.max_position, 1024);
        // 360e6 / 2048 = 175781.25, truncated
        assert_eq!(geometry.microdegrees_per_step, 175_781);
        assert_eq!(geometry.steps_per_revolution(), 2048);
    }

    #[test]
    fn test_half_step_resolution() {
        let geometry = TravelGeometry::new(90, SteppingStyle::Half);

        assert_eq!(geometry.max_position, 1024);
        assert_eq!(geometry.microdegrees_per_step, 87_890);
        assert_eq!(geometry.pattern.len(), 8);
    }

    #[test]
    fn test_truncating_max_position() {
        // 2048 * 7 / 360 = 39.8
        let geometry = TravelGeometry::new(7, SteppingStyle::Full);
        assert_eq!(geometry.max_position, 39);
    }

    #[test]
    fn test_step_delay() {
        let geometry = TravelGeometry::new(180, SteppingStyle::Full);

        assert_eq!(geometry.step_delay_us(DegreesPerSec(0)), None);
        assert_eq!(geometry.step_delay_us(DegreesPerSec(90)), Some(1953));
        assert_eq!(geometry.step_delay_us(DegreesPerSec(-90)), Some(1953));
        // Calibration default
        assert_eq!(geometry.step_delay_us(DegreesPerSec(25)), Some(7031));
        // Very slow: no cap
        assert_eq!(geometry.step_delay_us(DegreesPerSec(1)), Some(175_781));
    }

    #[test]
    fn test_microdegrees() {
        let geometry = TravelGeometry::new(180, SteppingStyle::Full);
        assert_eq!(geometry.steps_to_microdegrees(Steps(512)), 89_999_872);
        assert_eq!(geometry.steps_to_microdegrees(Steps(-2)), -351_562);
    }
}
