//! # coil-stepper
//!
//! Polled controller for 4-wire unipolar stepper motors (28BYJ-48 and alike)
//! with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Four motion modes**: continuous run, single step, eased timed moves
//!   and homing against a limit sensor
//! - **embedded-hal 1.0**: Uses `OutputPin` for the coils, `InputPin` for the sensor
//! - **no_std compatible**: Core library works without standard library
//! - **Non-blocking**: Never sleeps, call `poll()` from the control loop
//! - **Integer only**: Sine ease curve in fixed point, no FPU needed
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coil_stepper::{StepperMotor, SteppingStyle, Steps};
//!
//! // Coils and sensor come configured from the HAL
//! let mut motor = StepperMotor::builder()
//!     .name("pan")
//!     .coils([in1, in2, in3, in4])
//!     .sensor(home_switch)
//!     .clock(timer)
//!     .max_angle(180)
//!     .stepping(SteppingStyle::Half)
//!     .build()?;
//!
//! // Homing runs first
//! while motor.is_calibrating() {
//!     motor.poll()?;
//! }
//!
//! motor.goto_position(Steps(1024), 2_000);
//! loop {
//!     motor.poll()?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables TOML configuration loading and `StdClock`
//! - `log` (default): Diagnostics through the `log` facade
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible everywhere
#[macro_use]
mod fmt;

// Core modules
pub mod clock;
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use clock::{Clock, SimulatedClock};
pub use config::{validate_config, MotorConfig, StepTiming, SystemConfig, TravelGeometry};
pub use error::{Error, Result};
pub use motion::{Direction, GotoMove, SteppingStyle};
pub use motor::{Mode, StepperMotor, StepperMotorBuilder};

#[cfg(feature = "std")]
pub use clock::StdClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{DegreesPerSec, Steps};
