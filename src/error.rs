//! Error types for coil-stepper.
//!
//! Motion itself never fails: travel limits and timing anomalies are clamped
//! and reported through diagnostics. Errors only come from invalid settings
//! and from the pins handed to the driver.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all coil-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor hardware error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Maximum travel angle must be greater than zero
    InvalidMaxAngle(u16),
    /// Calibration sweep speed must be greater than zero
    InvalidCalibrationSpeed(i32),
    /// Eased delay bounds are inverted
    InvalidDelayLimits {
        /// Lower bound in microseconds
        min_us: u32,
        /// Upper bound in microseconds
        max_us: u32,
    },
    /// A builder was missing a required part
    MissingComponent(&'static str),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor hardware errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// A coil or sensor pin operation failed
    PinError,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMaxAngle(v) => {
                write!(f, "Invalid max angle: {}. Must be > 0 degrees", v)
            }
            ConfigError::InvalidCalibrationSpeed(v) => {
                write!(f, "Invalid calibration speed: {}. Must be > 0 deg/s", v)
            }
            ConfigError::InvalidDelayLimits { min_us, max_us } => write!(
                f,
                "Invalid step delay limits: min ({} us) must be <= max ({} us)",
                min_us, max_us
            ),
            ConfigError::MissingComponent(what) => write!(f, "{} is required", what),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

/// Keep as much of `text` as fits instead of dropping it.
pub(crate) fn truncated<const N: usize>(text: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_delay_limits() {
        let err = Error::from(ConfigError::InvalidDelayLimits {
            min_us: 5000,
            max_us: 100,
        });
        let text = format!("{}", err);
        assert!(text.contains("5000"));
        assert!(text.contains("100"));
    }

    #[test]
    fn test_truncated_long_text() {
        let long = "x".repeat(300);
        assert_eq!(truncated::<128>(&long).len(), 128);
        assert_eq!(truncated::<32>("pan").as_str(), "pan");
        // Never splits a multi-byte character.
        assert_eq!(truncated::<4>("abcé").as_str(), "abc");
    }

    #[test]
    fn test_pin_error_conversion() {
        let err: Error = MotorError::PinError.into();
        assert_eq!(err, Error::Motor(MotorError::PinError));
    }
}
