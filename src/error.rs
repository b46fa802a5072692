//! Error types for stepper-axis.
//!
//! Out-of-range targets, end stops and cancellation are normal terminations of
//! a move and never show up here. Errors cover configuration problems, GPIO
//! failures reported by the HAL, and misuse of the asynchronous controller.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-axis operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep divisor (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Steps per revolution must be > 0
    InvalidStepsPerRevolution(u32),
    /// Cruise speed must be > 0 RPM
    InvalidSpeed(u32),
    /// Cruise speed above the configured ceiling
    SpeedExceedsMax {
        /// Configured cruise speed in RPM
        speed: u32,
        /// Configured ceiling in RPM
        max: u32,
    },
    /// Step rate too low to derive a step delay (needs at least one step per second)
    StepRateTooLow {
        /// Effective steps per minute (`speed * steps / fullsteps`)
        steps_per_minute: u64,
    },
    /// Wrap-around modulus must be > 0
    InvalidWrap(i64),
    /// Travel limit must be > 0
    InvalidLimit(i64),
    /// Travel limit beyond the wrap-around modulus
    LimitExceedsWrap {
        /// Travel limit in steps
        limit: i64,
        /// Wrap-around modulus in steps
        max_steps: i64,
    },
    /// A required builder component was not supplied
    MissingComponent(&'static str),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// A move is already in flight
    Busy,
    /// The move worker thread panicked
    #[cfg(feature = "std")]
    WorkerPanicked,
    /// The shared controller lock was poisoned by a panicking holder
    #[cfg(feature = "std")]
    Poisoned,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidSpeed(v) => write!(f, "Invalid speed: {} rpm. Must be > 0", v),
            ConfigError::SpeedExceedsMax { speed, max } => {
                write!(f, "Speed {} rpm exceeds maximum {} rpm", speed, max)
            }
            ConfigError::StepRateTooLow { steps_per_minute } => {
                write!(f, "Step rate of {} steps/min is below 60 steps/min", steps_per_minute)
            }
            ConfigError::InvalidWrap(v) => write!(f, "Invalid max_steps: {}. Must be > 0", v),
            ConfigError::InvalidLimit(v) => write!(f, "Invalid limit: {}. Must be > 0", v),
            ConfigError::LimitExceedsWrap { limit, max_steps } => {
                write!(f, "Limit {} exceeds max_steps {}", limit, max_steps)
            }
            ConfigError::MissingComponent(name) => write!(f, "{} is required", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::Busy => write!(f, "A move is already in progress"),
            #[cfg(feature = "std")]
            MotorError::WorkerPanicked => write!(f, "Move worker panicked"),
            #[cfg(feature = "std")]
            MotorError::Poisoned => write!(f, "Controller lock poisoned"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}
