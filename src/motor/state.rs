//! Motor operating modes.

use crate::motion::GotoMove;

/// What the motor is currently doing.
///
/// Exactly one mode is active. `Calibrating` lasts from construction (or a
/// recalibration request) until the home sensor trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Holding position.
    Idle,
    /// Turning continuously at a commanded speed.
    Running,
    /// Executing a timed move.
    Goto(GotoMove),
    /// Sweeping toward the home sensor.
    Calibrating,
}

impl Mode {
    /// Mode name for display/debugging.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Idle => "Idle",
            Mode::Running => "Running",
            Mode::Goto(_) => "Goto",
            Mode::Calibrating => "Calibrating",
        }
    }

    /// Whether the homing sweep is in progress.
    #[inline]
    pub fn is_calibrating(&self) -> bool {
        matches!(self, Mode::Calibrating)
    }

    /// The active timed move, if any.
    #[inline]
    pub fn goto(&self) -> Option<&GotoMove> {
        match self {
            Mode::Goto(goto) => Some(goto),
            _ => None,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Calibrating
    }
}
