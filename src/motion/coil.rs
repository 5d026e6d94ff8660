//! Coil-energization patterns for 4-wire steppers.
//!
//! Bit `n` of a pattern entry drives coil line `n`.

use serde::Deserialize;

/// Full-step table: two adjacent coils on at a time.
const FULL_STEP: [u8; 4] = [0b0011, 0b0110, 0b1100, 0b1001];

/// Half-step table: alternates one and two energized coils.
const HALF_STEP: [u8; 8] = [
    0b0001, 0b0011, 0b0010, 0b0110, 0b0100, 0b1100, 0b1000, 0b1001,
];

/// Coil excitation style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum SteppingStyle {
    /// Four states per cycle, higher torque.
    #[default]
    Full,
    /// Eight states per cycle, twice the resolution.
    Half,
}

impl SteppingStyle {
    /// The pattern table for this style.
    #[inline]
    pub fn pattern(self) -> CoilPattern {
        match self {
            SteppingStyle::Full => CoilPattern(&FULL_STEP),
            SteppingStyle::Half => CoilPattern(&HALF_STEP),
        }
    }

    /// Number of distinct coil states per cycle.
    #[inline]
    pub fn states(self) -> u32 {
        self.pattern().len() as u32
    }
}

/// An ordered, cyclic coil-energization table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoilPattern(&'static [u8]);

impl CoilPattern {
    /// Number of entries in one cycle.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for the built-in tables.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Table index for a micro-step position.
    ///
    /// Negative positions wrap backwards through the cycle, so position `-1`
    /// maps to the last entry.
    #[inline]
    pub fn index_of(&self, position: i32) -> usize {
        position.rem_euclid(self.0.len() as i32) as usize
    }

    /// Coil bits for a micro-step position.
    #[inline]
    pub fn bits_at(&self, position: i32) -> u8 {
        self.0[self.index_of(position)]
    }

    /// Whether coil `line` (0..=3) is energized at `position`.
    #[inline]
    pub fn is_energized(&self, position: i32, line: usize) -> bool {
        self.bits_at(position) & (1 << line) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_lengths() {
        assert_eq!(SteppingStyle::Full.states(), 4);
        assert_eq!(SteppingStyle::Half.states(), 8);
    }

    #[test]
    fn test_negative_positions_wrap_backwards() {
        let full = SteppingStyle::Full.pattern();
        assert_eq!(full.index_of(-1), 3);
        assert_eq!(full.index_of(-4), 0);
        assert_eq!(full.index_of(-5), 3);
        assert_eq!(full.bits_at(-1), 0b1001);

        let half = SteppingStyle::Half.pattern();
        assert_eq!(half.index_of(-3), 5);
        assert_eq!(half.index_of(17), 1);
    }

    #[test]
    fn test_adjacent_states_share_a_coil() {
        // Consecutive entries must overlap or the rotor loses its place.
        for style in [SteppingStyle::Full, SteppingStyle::Half] {
            let pattern = style.pattern();
            for position in 0..pattern.len() as i32 {
                assert_ne!(pattern.bits_at(position) & pattern.bits_at(position + 1), 0);
            }
        }
    }

    #[test]
    fn test_is_energized() {
        let full = SteppingStyle::Full.pattern();
        // 0b0110 at index 1
        assert!(!full.is_energized(1, 0));
        assert!(full.is_energized(1, 1));
        assert!(full.is_energized(1, 2));
        assert!(!full.is_energized(1, 3));
    }
}
