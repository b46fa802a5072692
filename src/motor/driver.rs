//! Single-axis motion controller.
//!
//! Generic over embedded-hal 1.0 pin types. Drives a step/direction driver
//! chip (TMC22xx and friends) through three output lines: DIR, STEP and an
//! active-low ENABLE.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Steps;
use crate::config::{MotorConfig, StepTiming, TravelLimits};
use crate::error::{Error, MotorError, Result};
use crate::motion::{CancelToken, Direction, MoveExecutor};

use super::builder::MotionControllerBuilder;
use super::endstop::{EndStop, NoEndStop};
use super::position::Position;
use super::state::AxisState;

/// Time given to a concurrently running move to notice cancellation before
/// the driver is de-energized, in ms.
pub const HALT_SETTLE_MS: u32 = 100;

/// Verbosity that logs halt, move and nudge events.
pub const DEBUG_EVENTS: u8 = 1;

/// Verbosity that additionally logs every step.
pub const DEBUG_STEPS: u8 = 2;

/// Stepper axis controller.
///
/// Generic over:
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `EN`: ENABLE pin type (must implement `OutputPin`, low = energized)
/// - `DELAY`: Delay provider (must implement `DelayNs`)
/// - `END`: End-stop hook (defaults to `NoEndStop`)
pub struct MotionController<DIR, STEP, EN, DELAY, END = NoEndStop>
where
    DIR: OutputPin,
    STEP: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    END: EndStop,
{
    /// DIR pin (high = counter-clockwise unless inverted).
    dir_pin: DIR,

    /// STEP pin, toggled once per pulse phase.
    step_pin: STEP,

    /// ENABLE pin (low = coils energized).
    enable_pin: EN,

    /// Delay provider for step timing.
    delay: DELAY,

    /// End-stop hook polled before each pulse.
    end_stop: END,

    config: MotorConfig,
    timing: StepTiming,
    limits: TravelLimits,

    /// Current absolute position.
    position: Position,

    /// Target of the next move.
    target: Steps,

    /// Signed stride of the current move, 0 when idle.
    direction: i64,

    /// Level last written to the STEP line.
    step_state: bool,

    state: AxisState,

    /// Shared "moving" flag.
    token: CancelToken,

    /// Log verbosity: 0 silent, 1 events, 2 every step.
    debug: u8,
}

impl<DIR, STEP, EN, DELAY> MotionController<DIR, STEP, EN, DELAY, NoEndStop>
where
    DIR: OutputPin,
    STEP: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Start building a controller.
    pub fn builder() -> MotionControllerBuilder<DIR, STEP, EN, DELAY> {
        MotionControllerBuilder::new()
    }
}

impl<DIR, STEP, EN, DELAY, END> MotionController<DIR, STEP, EN, DELAY, END>
where
    DIR: OutputPin,
    STEP: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    END: EndStop,
{
    /// Create a controller. The caller must `halt()` before first use.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        dir_pin: DIR,
        step_pin: STEP,
        enable_pin: EN,
        delay: DELAY,
        end_stop: END,
        config: MotorConfig,
        timing: StepTiming,
        token: CancelToken,
        position: Steps,
        target: Steps,
        debug: u8,
    ) -> Self {
        let limits = TravelLimits::from_config(&config);
        Self {
            dir_pin,
            step_pin,
            enable_pin,
            delay,
            end_stop,
            position: Position::new(position, Steps(limits.max_steps)),
            limits,
            config,
            timing,
            target,
            direction: 0,
            step_state: false,
            state: AxisState::Idle,
            token,
            debug,
        }
    }

    /// Get current position in steps.
    #[inline]
    pub fn position(&self) -> Steps {
        self.position.steps()
    }

    /// Overwrite the current position, reduced into `[0, max_steps)`.
    pub fn set_position(&mut self, position: impl Into<Steps>) {
        self.position.set_steps(position.into());
    }

    /// Get the target of the next (or last) move.
    #[inline]
    pub fn target(&self) -> Steps {
        self.target
    }

    /// Set the target used by [`move_to_target`](Self::move_to_target).
    pub fn set_target(&mut self, target: impl Into<Steps>) {
        self.target = target.into();
    }

    /// Signed stride of the move in progress (`±fullsteps`, `±1` while
    /// nudging), 0 when idle.
    #[inline]
    pub fn direction(&self) -> i64 {
        self.direction
    }

    /// Level last written to the STEP line.
    #[inline]
    pub fn step_state(&self) -> bool {
        self.step_state
    }

    /// Current axis state.
    #[inline]
    pub fn state(&self) -> AxisState {
        self.state
    }

    /// Whether a move is in progress (the shared "moving" flag).
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.token.is_moving()
    }

    /// A handle that can stop the running move from another context.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Get the axis configuration.
    #[inline]
    pub fn config(&self) -> &MotorConfig {
        &self.config
    }

    /// Get the derived step timing.
    #[inline]
    pub fn timing(&self) -> &StepTiming {
        &self.timing
    }

    /// Replace the axis configuration.
    ///
    /// The position is re-reduced if the wrap modulus changes.
    ///
    /// # Errors
    ///
    /// Returns the validation error and keeps the old configuration if the
    /// new one is invalid.
    pub fn set_config(&mut self, config: MotorConfig) -> Result<()> {
        let timing = StepTiming::from_config(&config)?;
        self.limits = TravelLimits::from_config(&config);
        self.position.set_modulus(Steps(self.limits.max_steps));
        self.timing = timing;
        self.config = config;
        Ok(())
    }

    /// Log verbosity.
    #[inline]
    pub fn debug(&self) -> u8 {
        self.debug
    }

    /// Set log verbosity: 0 silent, 1 events, 2 every step.
    pub fn set_debug(&mut self, level: u8) {
        self.debug = level;
    }

    /// Stop and de-energize the driver.
    ///
    /// Clears the moving flag, waits [`HALT_SETTLE_MS`] so a move running in
    /// another context sees it, then drives DIR, STEP and ENABLE high. Safe
    /// to call at any time and any number of times.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::PinError` if any line could not be driven; the
    /// remaining lines are still attempted.
    pub fn halt(&mut self) -> Result<()> {
        if self.debug >= DEBUG_EVENTS {
            debug!("Halt at {}", self.position.steps().0);
        }

        self.token.cancel();
        self.delay.delay_ms(HALT_SETTLE_MS);

        let lines = [
            drive(&mut self.dir_pin, true),
            drive(&mut self.step_pin, true),
            drive(&mut self.enable_pin, true),
        ];

        self.step_state = true;
        self.direction = 0;
        self.state = AxisState::Idle;

        lines.into_iter().collect()
    }

    /// Move to `target` and block until the move ends.
    ///
    /// Returns the final position. A target outside `[0, limit)` is not an
    /// error: the axis stops at the last reachable position.
    pub fn move_to(&mut self, target: impl Into<Steps>) -> Result<Steps> {
        self.target = target.into();
        self.move_to_target()
    }

    /// Move to the previously set target and block until the move ends.
    pub fn move_to_target(&mut self) -> Result<Steps> {
        self.token.start();
        self.run_move()
    }

    /// Run the move loop without touching the moving flag, then halt.
    ///
    /// A cancellation issued before this point is honored without
    /// energizing the driver.
    pub(crate) fn run_move(&mut self) -> Result<Steps> {
        // halted before the move got going; the lines are already high
        if !self.token.is_moving() {
            return Ok(self.position.steps());
        }

        let driven = self.drive_move();
        let halted = self.halt();
        driven?;
        halted?;
        Ok(self.position.steps())
    }

    fn drive_move(&mut self) -> Result<()> {
        drive(&mut self.enable_pin, false)?;
        self.state = AxisState::Moving;

        let mut executor =
            MoveExecutor::new(self.position.steps(), self.target, &self.config, &self.timing);
        self.direction = executor.stride();

        if self.debug >= DEBUG_EVENTS {
            debug!(
                "Move {} -> {}, delay {} us",
                self.position.steps().0,
                self.target.0,
                self.timing.half_step_delay_us
            );
        }

        while self.token.is_moving() {
            let Some(planned) = executor.next_step() else {
                break;
            };

            if !self.step()? {
                break;
            }
            self.delay.delay_us(planned.delay_us);

            if !self.step()? {
                break;
            }
            self.delay.delay_us(planned.delay_us);

            self.position.set_steps(planned.position);
        }

        if self.debug >= DEBUG_EVENTS {
            debug!(
                "Move ended at {} after {} steps",
                self.position.steps().0,
                executor.steps_taken()
            );
        }

        Ok(())
    }

    /// Take a single step toward the target, then halt.
    ///
    /// Used after switching between full and micro stepping to land on a
    /// full-step position. Unlike a move, the stride is always `±1`
    /// regardless of `fullsteps`, one pulse phase is emitted rather than
    /// two, no ramp applies, and the moving flag is not consulted. A target
    /// equal to the position steps upward.
    pub fn nudge(&mut self) -> Result<Steps> {
        if self.debug >= DEBUG_EVENTS {
            debug!("Nudge at {}", self.position.steps().0);
        }

        let stepped = self.drive_nudge();
        let halted = self.halt();
        stepped?;
        halted?;
        Ok(self.position.steps())
    }

    fn drive_nudge(&mut self) -> Result<()> {
        drive(&mut self.enable_pin, false)?;
        self.state = AxisState::Moving;

        let position = self.position.steps().0;
        self.direction = if position > self.target.0 { -1 } else { 1 };

        if self.limits.allows(position + self.direction) && self.step()? {
            self.delay.delay_us(self.timing.nudge_delay_us);
            self.position.move_steps(self.direction);
        }

        Ok(())
    }

    /// Emit one pulse phase.
    ///
    /// Returns `false` without touching the lines if the position is at or
    /// past the limit, or if the end stop is triggered. In the latter case
    /// the moving flag is cleared and the caller's closing `halt()` stops
    /// the axis.
    fn step(&mut self) -> Result<bool> {
        let position = self.position.steps().0;
        if position >= self.limits.limit {
            return Ok(false);
        }

        if self.end_stop.is_triggered() {
            warn!("End stop triggered at {}", position);
            self.token.cancel();
            return Ok(false);
        }

        if self.debug >= DEBUG_STEPS {
            trace!("Step {}", position);
        }

        self.step_state = !self.step_state;
        let dir_high = Direction::from_steps(self.direction).pin_high(self.config.invert);
        drive(&mut self.dir_pin, dir_high)?;
        drive(&mut self.step_pin, self.step_state)?;

        Ok(true)
    }
}

fn drive<P: OutputPin>(pin: &mut P, high: bool) -> Result<()> {
    let level = if high { pin.set_high() } else { pin.set_low() };
    level.map_err(|_| Error::Motor(MotorError::PinError))
}
