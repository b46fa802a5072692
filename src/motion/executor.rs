//! Move planning - one logical step at a time.

use crate::config::units::Steps;
use crate::config::{MotorConfig, StepTiming, TravelLimits};

use super::profile::{Direction, MotionPhase, Ramp};

/// A step the controller should emit next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedStep {
    /// Position after this step.
    pub position: Steps,
    /// Delay after each of the step's two pulse phases, in µs.
    pub delay_us: u32,
}

/// Runtime planner for a single move.
///
/// Direction and stride are fixed at construction and never re-evaluated.
/// The planner stops, without error, when the target is reached, when the
/// next position would leave `[0, limit)`, or when the next stride would
/// carry the position past the target.
#[derive(Debug, Clone)]
pub struct MoveExecutor {
    position: i64,
    target: i64,
    direction: Direction,
    stride: i64,
    limits: TravelLimits,
    ramp: Ramp,
    base_delay_us: u32,
    phase: MotionPhase,
    steps_taken: u32,
}

impl MoveExecutor {
    /// Plan a move from `position` to `target`.
    pub fn new(position: Steps, target: Steps, config: &MotorConfig, timing: &StepTiming) -> Self {
        let direction = Direction::toward(position.0, target.0);
        let ramp = Ramp::new(config.accel, config.fullsteps);
        let phase = if position == target {
            MotionPhase::Complete
        } else {
            ramp.initial_phase()
        };

        Self {
            position: position.0,
            target: target.0,
            direction,
            stride: direction.sign() * config.fullsteps.stride(),
            limits: TravelLimits::from_config(config),
            ramp,
            base_delay_us: timing.half_step_delay_us,
            phase,
            steps_taken: 0,
        }
    }

    /// Check if motion is complete.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.phase == MotionPhase::Complete
    }

    /// Position after the last planned step.
    #[inline]
    pub fn position(&self) -> Steps {
        Steps(self.position)
    }

    /// Target of this move.
    #[inline]
    pub fn target(&self) -> Steps {
        Steps(self.target)
    }

    /// Direction chosen at the start of the move.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Signed position change per step (`±fullsteps`).
    #[inline]
    pub fn stride(&self) -> i64 {
        self.stride
    }

    /// Get the current phase.
    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Current ramp term in µs.
    #[inline]
    pub fn slow_us(&self) -> u32 {
        self.ramp.slow_us()
    }

    /// Number of steps planned so far.
    #[inline]
    pub fn steps_taken(&self) -> u32 {
        self.steps_taken
    }

    /// Plan the next step.
    ///
    /// Returns `None` once the move is over.
    pub fn next_step(&mut self) -> Option<PlannedStep> {
        if self.is_complete() {
            return None;
        }

        let next = self.position + self.stride;
        let overshoots = match self.direction {
            Direction::Clockwise => next > self.target,
            Direction::CounterClockwise => next < self.target,
        };

        if self.position == self.target || overshoots || !self.limits.allows(next) {
            self.phase = MotionPhase::Complete;
            return None;
        }

        self.position = self.limits.wrap(next).0;
        self.phase = self.ramp.update(self.target.abs_diff(self.position));
        self.steps_taken += 1;

        Some(PlannedStep {
            position: Steps(self.position),
            delay_us: self.base_delay_us.saturating_add(self.ramp.slow_us()),
        })
    }
}

impl Iterator for MoveExecutor {
    type Item = PlannedStep;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_step()
    }
}
