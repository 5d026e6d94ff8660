//! Configuration module for coil-stepper.
//!
//! Provides types for loading and validating motor configurations from TOML
//! files (with `std` feature) or building them in code.

mod limits;
mod mechanical;
mod motor;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use limits::{
    StepTiming, DEFAULT_CALIBRATION_SPEED, DEFAULT_HOMING_RETURN_MS, DEFAULT_MAX_DELAY_US,
    DEFAULT_MIN_DELAY_US,
};
pub use mechanical::{TravelGeometry, CYCLES_PER_REVOLUTION};
pub use motor::MotorConfig;
pub use system::SystemConfig;
pub use validation::{validate_config, validate_motor};
pub(crate) use validation::validate_settings;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{DegreesPerSec, Steps};
