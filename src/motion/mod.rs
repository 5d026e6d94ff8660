//! Motion module for coil-stepper.
//!
//! Coil patterns, step direction, timed moves and their ease curve.

pub mod coil;
mod direction;
pub mod ease;
mod goto;

pub use coil::{CoilPattern, SteppingStyle};
pub use direction::Direction;
pub use ease::{ease_in_out_delay, isqrt};
pub use goto::GotoMove;
