//! Motor module for coil-stepper.
//!
//! Provides the polled stepper driver, its operating modes and position tracking.

mod builder;
mod driver;
mod position;
pub mod state;

pub use builder::StepperMotorBuilder;
pub use driver::StepperMotor;
pub use position::{Edge, Position};
pub use state::Mode;
