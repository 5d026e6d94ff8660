//! Position tracking for stepper motors.
//!
//! Absolute micro-step count from home, with clamping to the travel range.

use crate::config::units::Steps;
use crate::motion::Direction;

/// Which end of the travel range was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Position 0, the home side.
    Home,
    /// The far end, at the maximum position.
    Far,
}

impl Edge {
    /// Edge name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Edge::Home => "home",
            Edge::Far => "far",
        }
    }
}

/// Motor position tracker.
///
/// The count may go negative while homing; everywhere else it is kept in
/// `0..=max` by [`Position::clamp_to_travel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Position {
    /// Current position in micro-steps (from home)
    steps: Steps,
    /// Upper travel bound
    max: Steps,
}

impl Position {
    /// Create a position tracker at home.
    #[inline]
    pub fn new(max: Steps) -> Self {
        Self {
            steps: Steps::default(),
            max,
        }
    }

    /// Create a position tracker at a specific position.
    #[inline]
    pub fn at(steps: Steps, max: Steps) -> Self {
        Self { steps, max }
    }

    /// Get current position in steps.
    #[inline]
    pub fn steps(&self) -> Steps {
        self.steps
    }

    /// Move one micro-step.
    #[inline]
    pub fn advance(&mut self, direction: Direction) {
        self.steps = Steps(self.steps.0.saturating_add(direction.sign()));
    }

    /// Reset position to home (0 steps).
    #[inline]
    pub fn reset(&mut self) {
        self.steps = Steps::default();
    }

    /// Clamp into the travel range.
    ///
    /// Returns the edge when the position sits on or beyond either bound. Being
    /// exactly on a bound counts: motion must stop there.
    pub fn clamp_to_travel(&mut self) -> Option<Edge> {
        if self.steps.0 <= 0 {
            self.steps = Steps(0);
            Some(Edge::Home)
        } else if self.steps >= self.max {
            self.steps = self.max;
            Some(Edge::Far)
        } else {
            None
        }
    }
}
