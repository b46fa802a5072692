//! Axis configuration.

use serde::Deserialize;

use super::units::{Microsteps, Rpm, Steps};

/// Default steps per revolution of the stock motor.
pub const DEFAULT_STEPS_PER_REVOLUTION: u32 = 1012;

/// Default cruise speed.
pub const DEFAULT_SPEED: Rpm = Rpm(40);

/// Default travel ceiling.
pub const DEFAULT_LIMIT: Steps = Steps(3600);

/// Revolutions covered by the position counter before it wraps, when
/// `max_steps` is not given explicitly.
pub const DEFAULT_WRAP_REVOLUTIONS: i64 = 100;

/// Complete axis configuration.
///
/// Every field has a default, so an empty TOML document describes the stock
/// axis: 1012 steps/rev, full stepping, 40 rpm with ramping, travel below
/// step 3600.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotorConfig {
    /// Microstep divisor; also the position stride of one logical move step.
    pub fullsteps: Microsteps,

    /// Steps per physical revolution.
    pub steps: u32,

    /// Enable the acceleration/deceleration ramp.
    pub accel: bool,

    /// Cruise speed.
    pub speed: Rpm,

    /// Wrap-around modulus of the position counter. `None` means
    /// `steps * 100`.
    pub max_steps: Option<Steps>,

    /// Travel ceiling. Positions at or above it are never reached.
    pub limit: Steps,

    /// Invert direction pin logic.
    pub invert: bool,

    /// Optional ceiling for `speed`, checked at validation time.
    pub max_speed: Option<Rpm>,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            fullsteps: Microsteps::FULL,
            steps: DEFAULT_STEPS_PER_REVOLUTION,
            accel: true,
            speed: DEFAULT_SPEED,
            max_steps: None,
            limit: DEFAULT_LIMIT,
            invert: false,
            max_speed: None,
        }
    }
}

impl MotorConfig {
    /// Effective wrap-around modulus in steps.
    pub fn wrap_modulus(&self) -> Steps {
        self.max_steps
            .unwrap_or(Steps(self.steps as i64 * DEFAULT_WRAP_REVOLUTIONS))
    }

    /// Logical steps per revolution after applying the microstep divisor.
    pub fn effective_steps_per_revolution(&self) -> u32 {
        self.steps / self.fullsteps.value() as u32
    }
}
