//! Step timing derived from axis configuration.

use super::motor::MotorConfig;
use super::validation::validate_motor;
use crate::error::Result;

const MICROS_PER_SECOND: u64 = 1_000_000;
const SECONDS_PER_MINUTE: u64 = 60;

/// Derived step delays, computed once per configuration.
///
/// All arithmetic is integer and truncates at each stage:
/// `(1_000_000 / ((speed * (steps / fullsteps)) / 60)) / 2` for a move,
/// `1_000_000 / ((speed * steps) / 60)` for a nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTiming {
    /// Delay after each of the two pulse phases of a move step, in µs.
    pub half_step_delay_us: u32,

    /// Delay after the single pulse of a nudge, in µs. Uses the raw
    /// steps-per-revolution and is not halved.
    pub nudge_delay_us: u32,
}

impl StepTiming {
    /// Compute step timing from a configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error if the configuration would produce an
    /// undefined delay (zero speed, zero step rate, ...).
    pub fn from_config(config: &MotorConfig) -> Result<Self> {
        validate_motor(config)?;

        let speed = config.speed.0 as u64;

        let move_rate = speed * config.effective_steps_per_revolution() as u64 / SECONDS_PER_MINUTE;
        let half_step_delay_us = (MICROS_PER_SECOND / move_rate) / 2;

        let nudge_rate = speed * config.steps as u64 / SECONDS_PER_MINUTE;
        let nudge_delay_us = MICROS_PER_SECOND / nudge_rate;

        Ok(Self {
            half_step_delay_us: half_step_delay_us as u32,
            nudge_delay_us: nudge_delay_us as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Microsteps, Rpm};

    #[test]
    fn test_stock_axis_delays() {
        let timing = StepTiming::from_config(&MotorConfig::default()).unwrap();

        // 40 rpm * 1012 steps = 40480 steps/min -> 674 steps/s
        // 1_000_000 / 674 = 1483 -> halved = 741
        assert_eq!(timing.half_step_delay_us, 741);
        assert_eq!(timing.nudge_delay_us, 1483);
    }

    #[test]
    fn test_microstep_divisor_slows_move_not_nudge() {
        let config = MotorConfig {
            fullsteps: Microsteps::HALF,
            ..MotorConfig::default()
        };
        let timing = StepTiming::from_config(&config).unwrap();

        // 40 * 506 / 60 = 337 -> 1_000_000 / 337 = 2967 -> 1483
        assert_eq!(timing.half_step_delay_us, 1483);
        assert_eq!(timing.nudge_delay_us, 1483);
    }

    #[test]
    fn test_zero_speed_has_no_timing() {
        let config = MotorConfig {
            speed: Rpm(0),
            ..MotorConfig::default()
        };
        assert!(StepTiming::from_config(&config).is_err());
    }
}
