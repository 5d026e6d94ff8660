//! Step timing limits.

use super::units::DegreesPerSec;

/// Homing sweep speed.
pub const DEFAULT_CALIBRATION_SPEED: DegreesPerSec = DegreesPerSec(25);

/// Fastest step rate an eased move may ask for.
pub const DEFAULT_MIN_DELAY_US: u32 = 1_000;

/// Slowest step rate an eased move may ask for.
pub const DEFAULT_MAX_DELAY_US: u32 = 100_000;

/// Duration of the move back to the starting point after homing.
pub const DEFAULT_HOMING_RETURN_MS: u32 = 1_500;

/// Fixed timing constants of a motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTiming {
    /// Speed of the homing sweep.
    pub calibration_speed: DegreesPerSec,

    /// Lower clamp for eased step delays, in microseconds.
    pub min_delay_us: u32,

    /// Upper clamp for eased step delays, in microseconds.
    pub max_delay_us: u32,

    /// Duration of the return move issued when homing completes.
    pub homing_return_ms: u32,
}

impl Default for StepTiming {
    fn default() -> Self {
        Self {
            calibration_speed: DEFAULT_CALIBRATION_SPEED,
            min_delay_us: DEFAULT_MIN_DELAY_US,
            max_delay_us: DEFAULT_MAX_DELAY_US,
            homing_return_ms: DEFAULT_HOMING_RETURN_MS,
        }
    }
}

impl StepTiming {
    /// Check if the limits are usable (ordered bounds, forward sweep speed).
    pub fn is_valid(&self) -> bool {
        self.min_delay_us <= self.max_delay_us && self.calibration_speed.0 > 0
    }

    /// Check if an eased delay is within bounds.
    #[inline]
    pub fn contains_delay(&self, delay_us: u32) -> bool {
        delay_us >= self.min_delay_us && delay_us <= self.max_delay_us
    }

    /// Clamp an eased delay into bounds.
    #[inline]
    pub fn clamp_delay(&self, delay_us: u32) -> u32 {
        delay_us.clamp(self.min_delay_us, self.max_delay_us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let timing = StepTiming::default();
        assert!(timing.is_valid());
        assert_eq!(timing.calibration_speed, DegreesPerSec(25));
        assert_eq!(timing.homing_return_ms, 1500);
    }

    #[test]
    fn test_clamp_delay() {
        let timing = StepTiming::default();

        assert!(timing.contains_delay(1_000));
        assert!(timing.contains_delay(100_000));
        assert!(!timing.contains_delay(999));
        assert!(!timing.contains_delay(u32::MAX));

        assert_eq!(timing.clamp_delay(10), 1_000);
        assert_eq!(timing.clamp_delay(5_000), 5_000);
        assert_eq!(timing.clamp_delay(u32::MAX), 100_000);
    }

    #[test]
    fn test_invalid_limits() {
        let inverted = StepTiming {
            min_delay_us: 10,
            max_delay_us: 5,
            ..StepTiming::default()
        };
        assert!(!inverted.is_valid());

        let stalled = StepTiming {
            calibration_speed: DegreesPerSec(0),
            ..StepTiming::default()
        };
        assert!(!stalled.is_valid());
    }
}
