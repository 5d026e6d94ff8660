//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::motion::SteppingStyle;

use super::limits::{
    StepTiming, DEFAULT_CALIBRATION_SPEED, DEFAULT_HOMING_RETURN_MS, DEFAULT_MAX_DELAY_US,
    DEFAULT_MIN_DELAY_US,
};
use super::units::DegreesPerSec;

/// Complete motor configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Travel range from the home sensor, in degrees.
    pub max_angle_deg: u16,

    /// Coil excitation style (`"full"` or `"half"`).
    #[serde(default)]
    pub stepping: SteppingStyle,

    /// Homing sweep speed in degrees per second.
    #[serde(default = "default_calibration_speed", rename = "calibration_speed_dps")]
    pub calibration_speed: DegreesPerSec,

    /// Lower clamp for eased step delays.
    #[serde(default = "default_min_delay_us", rename = "min_step_delay_us")]
    pub min_delay_us: u32,

    /// Upper clamp for eased step delays.
    #[serde(default = "default_max_delay_us", rename = "max_step_delay_us")]
    pub max_delay_us: u32,

    /// Duration of the return move after homing.
    #[serde(default = "default_homing_return_ms")]
    pub homing_return_ms: u32,
}

fn default_calibration_speed() -> DegreesPerSec {
    DEFAULT_CALIBRATION_SPEED
}

fn default_min_delay_us() -> u32 {
    DEFAULT_MIN_DELAY_US
}

fn default_max_delay_us() -> u32 {
    DEFAULT_MAX_DELAY_US
}

fn default_homing_return_ms() -> u32 {
    DEFAULT_HOMING_RETURN_MS
}

impl MotorConfig {
    /// Timing constants from this configuration.
    pub fn timing(&self) -> StepTiming {
        StepTiming {
            calibration_speed: self.calibration_speed,
            min_delay_us: self.min_delay_us,
            max_delay_us: self.max_delay_us,
            homing_return_ms: self.homing_return_ms,
        }
    }
}
