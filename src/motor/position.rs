//! Wrap-around position counter.

use crate::config::units::Steps;

/// Position counted in steps, kept in `[0, modulus)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    steps: i64,
    modulus: i64,
}

impl Position {
    /// Create a counter at `steps`, reduced into range.
    ///
    /// `modulus` must be positive; configuration validation guarantees it.
    #[inline]
    pub fn new(steps: Steps, modulus: Steps) -> Self {
        Self {
            steps: steps.0.rem_euclid(modulus.0),
            modulus: modulus.0,
        }
    }

    /// Get current position in steps.
    #[inline]
    pub fn steps(&self) -> Steps {
        Steps(self.steps)
    }

    /// Get the wrap modulus.
    #[inline]
    pub fn modulus(&self) -> Steps {
        Steps(self.modulus)
    }

    /// Set position in steps, reduced into range.
    #[inline]
    pub fn set_steps(&mut self, steps: Steps) {
        self.steps = steps.0.rem_euclid(self.modulus);
    }

    /// Move by a number of steps with wraparound.
    #[inline]
    pub fn move_steps(&mut self, delta: i64) {
        self.steps = (self.steps + delta).rem_euclid(self.modulus);
    }

    /// Change the modulus, re-reducing the current value.
    #[inline]
    pub fn set_modulus(&mut self, modulus: Steps) {
        self.modulus = modulus.0;
        self.steps = self.steps.rem_euclid(self.modulus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wraps_both_ways() {
        let mut pos = Position::new(Steps(98), Steps(100));

        pos.move_steps(3);
        assert_eq!(pos.steps(), Steps(1));

        pos.move_steps(-2);
        assert_eq!(pos.steps(), Steps(99));
    }

    #[test]
    fn test_set_reduces_into_range() {
        let mut pos = Position::new(Steps(-1), Steps(1000));
        assert_eq!(pos.steps(), Steps(999));

        pos.set_steps(Steps(2500));
        assert_eq!(pos.steps(), Steps(500));

        pos.set_modulus(Steps(300));
        assert_eq!(pos.steps(), Steps(200));
    }
}
