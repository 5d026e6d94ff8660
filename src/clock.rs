//! Monotonic microsecond clocks.

use core::cell::Cell;

/// Something which reports elapsed real time in microseconds.
///
/// The counter wraps at `u32::MAX` (a little over 71 minutes); consumers only
/// ever compare timestamps with wrapping subtraction. This uses shared
/// references because a clock may be read by several components.
pub trait Clock {
    /// Microseconds since a clock-specific reference point.
    fn now_micros(&self) -> u32;
}

impl<'a, C: Clock + ?Sized> Clock for &'a C {
    fn now_micros(&self) -> u32 {
        (**self).now_micros()
    }
}

/// A manually advanced clock for host simulations and tests.
///
/// # Example
///
/// ```rust
/// use coil_stepper::clock::{Clock, SimulatedClock};
///
/// let clock = SimulatedClock::new();
/// clock.advance(1_500);
/// assert_eq!(clock.now_micros(), 1_500);
/// ```
#[derive(Debug, Default)]
pub struct SimulatedClock {
    now: Cell<u32>,
}

impl SimulatedClock {
    /// Create a clock reading zero.
    pub const fn new() -> Self {
        Self { now: Cell::new(0) }
    }

    /// Create a clock reading `micros`.
    pub const fn starting_at(micros: u32) -> Self {
        Self {
            now: Cell::new(micros),
        }
    }

    /// Move time forward, wrapping like a hardware counter.
    pub fn advance(&self, micros: u32) {
        self.now.set(self.now.get().wrapping_add(micros));
    }

    /// Jump to an absolute reading.
    pub fn set(&self, micros: u32) {
        self.now.set(micros);
    }
}

impl Clock for SimulatedClock {
    fn now_micros(&self) -> u32 {
        self.now.get()
    }
}

/// A monotonically non-decreasing clock backed by the operating system.
///
/// Requires the `std` feature.
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq)]
pub struct StdClock {
    created_at: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Create a clock whose zero is now.
    pub fn new() -> StdClock {
        StdClock::default()
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> StdClock {
        StdClock {
            created_at: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_micros(&self) -> u32 {
        // Truncation is the wrap.
        self.created_at.elapsed().as_micros() as u32
    }
}
