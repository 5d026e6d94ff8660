//! Step direction.

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increasing position, away from home.
    Forward,
    /// Decreasing position, toward home.
    Backward,
}

impl Direction {
    /// Direction from the sign of a value; `None` for zero.
    #[inline]
    pub fn from_sign(value: i32) -> Option<Self> {
        match value.signum() {
            1 => Some(Direction::Forward),
            -1 => Some(Direction::Backward),
            _ => None,
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sign() {
        assert_eq!(Direction::from_sign(90), Some(Direction::Forward));
        assert_eq!(Direction::from_sign(-1), Some(Direction::Backward));
        assert_eq!(Direction::from_sign(0), None);
        assert_eq!(Direction::from_sign(i32::MIN), Some(Direction::Backward));
    }

    #[test]
    fn test_sign_round_trip() {
        for d in [Direction::Forward, Direction::Backward] {
            assert_eq!(Direction::from_sign(d.sign()), Some(d));
        }
    }
}
