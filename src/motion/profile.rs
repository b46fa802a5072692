//! Direction and acceleration ramp.
//!
//! The ramp is a single extra delay term (`slow`) added on top of the cruise
//! delay. It starts high, bleeds off step by step while the target is far
//! away, and grows again once the target is inside the deceleration window.
//! The result is an approximate trapezoidal speed profile.

use crate::config::units::Microsteps;

/// Extra delay at the start of a ramped move, in µs.
pub const RAMP_START_US: u32 = 20_000;

/// Remaining distance, in steps, below which the ramp decelerates.
pub const DECELERATION_WINDOW: u64 = 200;

/// Per-step change of the ramp term, in µs (scaled by the microstep divisor
/// while decelerating).
pub const RAMP_INCREMENT_US: u32 = 100;

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (positive step count).
    Clockwise,
    /// Counter-clockwise (negative step count).
    CounterClockwise,
}

impl Direction {
    /// Get direction from signed step count. Zero counts as clockwise.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Direction of travel from `from` to `to`. Equal positions count as
    /// clockwise.
    #[inline]
    pub fn toward(from: i64, to: i64) -> Self {
        if to >= from {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// Level of the DIR line for this direction.
    ///
    /// Counter-clockwise drives the line high unless `invert` is set.
    #[inline]
    pub fn pin_high(self, invert: bool) -> bool {
        (self == Direction::CounterClockwise) != invert
    }
}

/// Current phase of motion execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// Ramp term shrinking toward cruise speed.
    Accelerating,
    /// Moving at the base step delay.
    Cruising,
    /// Inside the deceleration window, ramp term growing.
    Decelerating,
    /// Motion complete.
    Complete,
}

/// Acceleration ramp state for one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ramp {
    enabled: bool,
    slow_us: u32,
    decel_increment_us: u32,
}

impl Ramp {
    /// Create a ramp. Disabled ramps contribute no delay.
    pub fn new(enabled: bool, fullsteps: Microsteps) -> Self {
        Self {
            enabled,
            slow_us: if enabled { RAMP_START_US } else { 0 },
            decel_increment_us: RAMP_INCREMENT_US * fullsteps.value() as u32,
        }
    }

    /// Create a ramp that never adds delay.
    pub fn disabled() -> Self {
        Self::new(false, Microsteps::FULL)
    }

    /// Whether the ramp is active.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current extra delay in µs.
    #[inline]
    pub fn slow_us(&self) -> u32 {
        self.slow_us
    }

    /// Update the ramp after the position advanced, given the remaining
    /// distance to the target. Returns the phase the step belongs to.
    pub fn update(&mut self, remaining: u64) -> MotionPhase {
        if !self.enabled {
            return MotionPhase::Cruising;
        }

        if remaining < DECELERATION_WINDOW {
            self.slow_us = self.slow_us.saturating_add(self.decel_increment_us);
            MotionPhase::Decelerating
        } else if self.slow_us > 0 {
            self.slow_us = self.slow_us.saturating_sub(RAMP_INCREMENT_US);
            MotionPhase::Accelerating
        } else {
            MotionPhase::Cruising
        }
    }

    /// Phase before any step has been taken.
    pub fn initial_phase(&self) -> MotionPhase {
        if self.slow_us > 0 {
            MotionPhase::Accelerating
        } else {
            MotionPhase::Cruising
        }
    }
}
