//! Builder pattern for MotionController.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::{Microsteps, Rpm, Steps};
use crate::config::{MotorConfig, StepTiming};
use crate::error::{ConfigError, Result};
use crate::motion::CancelToken;

use super::driver::MotionController;
use super::endstop::{EndStop, NoEndStop};

/// Position a freshly powered axis assumes.
pub const INITIAL_POSITION: Steps = Steps(1);

/// Builder for creating MotionController instances.
pub struct MotionControllerBuilder<DIR, STEP, EN, DELAY, END = NoEndStop>
where
    DIR: OutputPin,
    STEP: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    END: EndStop,
{
    dir_pin: Option<DIR>,
    step_pin: Option<STEP>,
    enable_pin: Option<EN>,
    delay: Option<DELAY>,
    end_stop: END,
    config: MotorConfig,
    token: Option<CancelToken>,
    position: Steps,
    target: Steps,
    debug: u8,
}

impl<DIR, STEP, EN, DELAY> Default for MotionControllerBuilder<DIR, STEP, EN, DELAY>
where
    DIR: OutputPin,
    STEP: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<DIR, STEP, EN, DELAY> MotionControllerBuilder<DIR, STEP, EN, DELAY>
where
    DIR: OutputPin,
    STEP: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder with the stock axis configuration.
    pub fn new() -> Self {
        Self {
            dir_pin: None,
            step_pin: None,
            enable_pin: None,
            delay: None,
            end_stop: NoEndStop,
            config: MotorConfig::default(),
            token: None,
            position: INITIAL_POSITION,
            target: Steps(0),
            debug: 0,
        }
    }
}

impl<DIR, STEP, EN, DELAY, END> MotionControllerBuilder<DIR, STEP, EN, DELAY, END>
where
    DIR: OutputPin,
    STEP: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    END: EndStop,
{
    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the ENABLE pin (active low).
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Attach an end-stop hook.
    pub fn end_stop<E: EndStop>(self, end_stop: E) -> MotionControllerBuilder<DIR, STEP, EN, DELAY, E> {
        MotionControllerBuilder {
            dir_pin: self.dir_pin,
            step_pin: self.step_pin,
            enable_pin: self.enable_pin,
            delay: self.delay,
            end_stop,
            config: self.config,
            token: self.token,
            position: self.position,
            target: self.target,
            debug: self.debug,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MotorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the microstep divisor.
    pub fn fullsteps(mut self, fullsteps: Microsteps) -> Self {
        self.config.fullsteps = fullsteps;
        self
    }

    /// Set steps per physical revolution.
    pub fn steps_per_revolution(mut self, steps: u32) -> Self {
        self.config.steps = steps;
        self
    }

    /// Enable or disable the acceleration ramp.
    pub fn accel(mut self, accel: bool) -> Self {
        self.config.accel = accel;
        self
    }

    /// Set cruise speed.
    pub fn speed(mut self, speed: Rpm) -> Self {
        self.config.speed = speed;
        self
    }

    /// Set the travel ceiling.
    pub fn limit(mut self, limit: Steps) -> Self {
        self.config.limit = limit;
        self
    }

    /// Set the wrap-around modulus.
    pub fn max_steps(mut self, max_steps: Steps) -> Self {
        self.config.max_steps = Some(max_steps);
        self
    }

    /// Set direction inversion.
    pub fn invert(mut self, invert: bool) -> Self {
        self.config.invert = invert;
        self
    }

    /// Set the speed ceiling.
    pub fn max_speed(mut self, max_speed: Rpm) -> Self {
        self.config.max_speed = Some(max_speed);
        self
    }

    /// Set the initial position (default 1).
    pub fn position(mut self, position: Steps) -> Self {
        self.position = position;
        self
    }

    /// Set the initial target (default 0).
    pub fn target(mut self, target: Steps) -> Self {
        self.target = target;
        self
    }

    /// Set log verbosity.
    pub fn debug(mut self, level: u8) -> Self {
        self.debug = level;
        self
    }

    /// Share an existing cancellation token.
    ///
    /// Required without the `alloc` feature, where no heap-backed token can
    /// be created.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Build the MotionController and halt it.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin or the delay is missing, the configuration
    /// is invalid, or the initial halt fails.
    pub fn build(self) -> Result<MotionController<DIR, STEP, EN, DELAY, END>> {
        let dir_pin = self
            .dir_pin
            .ok_or(ConfigError::MissingComponent("dir_pin"))?;
        let step_pin = self
            .step_pin
            .ok_or(ConfigError::MissingComponent("step_pin"))?;
        let enable_pin = self
            .enable_pin
            .ok_or(ConfigError::MissingComponent("enable_pin"))?;
        let delay = self.delay.ok_or(ConfigError::MissingComponent("delay"))?;

        let timing = StepTiming::from_config(&self.config)?;

        let token = match self.token {
            Some(token) => token,
            None => default_token()?,
        };

        let mut controller = MotionController::new(
            dir_pin,
            step_pin,
            enable_pin,
            delay,
            self.end_stop,
            self.config,
            timing,
            token,
            self.position,
            self.target,
            self.debug,
        );

        controller.halt()?;
        Ok(controller)
    }
}

#[cfg(feature = "alloc")]
fn default_token() -> Result<CancelToken> {
    Ok(CancelToken::new())
}

#[cfg(not(feature = "alloc"))]
fn default_token() -> Result<CancelToken> {
    Err(ConfigError::MissingComponent("cancel_token").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::Mock as PinMock;

    #[test]
    fn test_missing_pin_reported() {
        let result = MotionControllerBuilder::<PinMock, PinMock, PinMock, NoopDelay>::new()
            .delay(NoopDelay::new())
            .build();

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingComponent("dir_pin")))
        ));
    }

    #[test]
    fn test_invalid_config_reported_before_halt() {
        let mut dir = PinMock::new(&[]);
        let mut step = PinMock::new(&[]);
        let mut enable = PinMock::new(&[]);

        let result = MotionControllerBuilder::new()
            .dir_pin(dir.clone())
            .step_pin(step.clone())
            .enable_pin(enable.clone())
            .delay(NoopDelay::new())
            .speed(Rpm(0))
            .build();

        assert!(matches!(result, Err(Error::Config(ConfigError::InvalidSpeed(0)))));
        dir.done();
        step.done();
        enable.done();
    }
}
