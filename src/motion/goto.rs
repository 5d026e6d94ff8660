//! Timed point-to-point moves.

use crate::config::units::Steps;

use super::direction::Direction;
use super::ease::ease_in_out_delay;

/// A timed move to an absolute position.
///
/// Carries what is needed to re-time every step of the move: where it started,
/// where it ends and how long the whole move should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GotoMove {
    /// Absolute target position.
    pub target: Steps,
    /// Position when the move was issued.
    pub start: Steps,
    /// Requested duration of the whole move in milliseconds.
    pub duration_ms: u32,
}

impl GotoMove {
    /// Plan a move from `start` to `target`.
    ///
    /// Returns `None` when there is nowhere to go.
    pub fn plan(start: Steps, target: Steps, duration_ms: u32) -> Option<Self> {
        if start == target {
            None
        } else {
            Some(Self {
                target,
                start,
                duration_ms,
            })
        }
    }

    /// Direction of travel.
    #[inline]
    pub fn direction(&self) -> Direction {
        if self.target > self.start {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Steps of the whole move, never zero.
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.start.distance_to(self.target)
    }

    /// Steps left from `position`.
    #[inline]
    pub fn remaining_steps(&self, position: Steps) -> u32 {
        position.distance_to(self.target)
    }

    /// Whether `position` is the target.
    #[inline]
    pub fn is_reached(&self, position: Steps) -> bool {
        position == self.target
    }

    /// Constant-rate delay spreading the move evenly over its duration.
    ///
    /// Used for the first step, before the eased timing takes over.
    pub fn linear_delay_us(&self) -> u32 {
        let total_us = u64::from(self.duration_ms) * 1000;
        (total_us / u64::from(self.total_steps())).min(u64::from(u32::MAX)) as u32
    }

    /// Eased delay for the step after `position`, unclamped.
    pub fn eased_delay_us(&self, position: Steps) -> u32 {
        ease_in_out_delay(
            self.remaining_steps(position),
            self.total_steps(),
            self.duration_ms,
        )
    }
}
