//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::limits::StepTiming;
use super::{MotorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks every motor:
/// - Travel angle is non-zero
/// - Calibration speed is positive
/// - Step delay limits are ordered (min <= max)
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, motor) in config.motors.iter() {
        validate_motor(motor)?;
    }

    Ok(())
}

/// Validate a single motor configuration.
pub fn validate_motor(config: &MotorConfig) -> Result<()> {
    validate_settings(config.max_angle_deg, &config.timing())
}

/// Validate the settings a motor is constructed from.
pub(crate) fn validate_settings(max_angle_deg: u16, timing: &StepTiming) -> Result<()> {
    if max_angle_deg == 0 {
        return Err(Error::Config(ConfigError::InvalidMaxAngle(max_angle_deg)));
    }

    if timing.calibration_speed.0 <= 0 {
        return Err(Error::Config(ConfigError::InvalidCalibrationSpeed(
            timing.calibration_speed.0,
        )));
    }

    if timing.min_delay_us > timing.max_delay_us {
        return Err(Error::Config(ConfigError::InvalidDelayLimits {
            min_us: timing.min_delay_us,
            max_us: timing.max_delay_us,
        }));
    }

    Ok(())
}
