//! Travel limits and position wrap-around.

use super::motor::MotorConfig;
use super::units::Steps;

/// Travel window and wrap modulus in steps (for runtime use).
///
/// Motion is confined to `[0, limit)`. The position counter additionally
/// wraps modulo `max_steps`; validation guarantees `limit <= max_steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelLimits {
    /// Exclusive upper bound of travel.
    pub limit: i64,
    /// Wrap-around modulus of the position counter.
    pub max_steps: i64,
}

impl TravelLimits {
    /// Create travel limits.
    pub const fn new(limit: i64, max_steps: i64) -> Self {
        Self { limit, max_steps }
    }

    /// Derive travel limits from an axis configuration.
    pub fn from_config(config: &MotorConfig) -> Self {
        Self {
            limit: config.limit.0,
            max_steps: config.wrap_modulus().0,
        }
    }

    /// Check if a position may be occupied.
    #[inline]
    pub fn allows(&self, position: i64) -> bool {
        (0..self.limit).contains(&position)
    }

    /// Reduce a position into `[0, max_steps)`.
    #[inline]
    pub fn wrap(&self, position: i64) -> Steps {
        Steps(position.rem_euclid(self.max_steps))
    }
}
