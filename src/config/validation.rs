//! Configuration validation.

use crate::error::{ConfigError, Result};

use super::MotorConfig;

/// Lowest step rate, in steps per minute, that still yields a finite delay.
const MIN_STEPS_PER_MINUTE: u64 = 60;

/// Validate an axis configuration.
///
/// Checks:
/// - Steps per revolution and speed are positive
/// - Speed does not exceed `max_speed` when one is set
/// - The effective step rate is at least one step per second, so the
///   half-step delay is well defined
/// - `0 < limit <= max_steps`
pub fn validate_motor(config: &MotorConfig) -> Result<()> {
    if config.steps == 0 {
        return Err(ConfigError::InvalidStepsPerRevolution(config.steps).into());
    }

    if config.speed.0 == 0 {
        return Err(ConfigError::InvalidSpeed(config.speed.0).into());
    }

    if let Some(max) = config.max_speed {
        if config.speed > max {
            return Err(ConfigError::SpeedExceedsMax {
                speed: config.speed.0,
                max: max.0,
            }
            .into());
        }
    }

    let steps_per_minute =
        config.speed.0 as u64 * config.effective_steps_per_revolution() as u64;
    if steps_per_minute < MIN_STEPS_PER_MINUTE {
        return Err(ConfigError::StepRateTooLow { steps_per_minute }.into());
    }

    let max_steps = config.wrap_modulus().0;
    if max_steps <= 0 {
        return Err(ConfigError::InvalidWrap(max_steps).into());
    }

    if config.limit.0 <= 0 {
        return Err(ConfigError::InvalidLimit(config.limit.0).into());
    }

    if config.limit.0 > max_steps {
        return Err(ConfigError::LimitExceedsWrap {
            limit: config.limit.0,
            max_steps,
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Microsteps, Rpm, Steps};
    use crate::error::Error;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_motor(&MotorConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_speed_rejected() {
        let config = MotorConfig {
            speed: Rpm(0),
            ..MotorConfig::default()
        };

        assert!(matches!(
            validate_motor(&config),
            Err(Error::Config(ConfigError::InvalidSpeed(0)))
        ));
    }

    #[test]
    fn test_speed_ceiling() {
        let config = MotorConfig {
            speed: Rpm(40),
            max_speed: Some(Rpm(30)),
            ..MotorConfig::default()
        };

        assert!(matches!(
            validate_motor(&config),
            Err(Error::Config(ConfigError::SpeedExceedsMax { speed: 40, max: 30 }))
        ));
    }

    #[test]
    fn test_divisor_larger_than_steps_rejected() {
        let config = MotorConfig {
            steps: 100,
            fullsteps: Microsteps::TWO_FIFTY_SIXTH,
            ..MotorConfig::default()
        };

        assert!(matches!(
            validate_motor(&config),
            Err(Error::Config(ConfigError::StepRateTooLow { steps_per_minute: 0 }))
        ));
    }

    #[test]
    fn test_limit_beyond_wrap_rejected() {
        let config = MotorConfig {
            limit: Steps(5000),
            max_steps: Some(Steps(4000)),
            ..MotorConfig::default()
        };

        assert!(matches!(
            validate_motor(&config),
            Err(Error::Config(ConfigError::LimitExceedsWrap { limit: 5000, max_steps: 4000 }))
        ));
    }

    #[test]
    fn test_non_positive_limit_rejected() {
        let config = MotorConfig {
            limit: Steps(0),
            ..MotorConfig::default()
        };

        assert!(matches!(
            validate_motor(&config),
            Err(Error::Config(ConfigError::InvalidLimit(0)))
        ));
    }
}
