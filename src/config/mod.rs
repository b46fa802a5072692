//! Configuration module for stepper-axis.
//!
//! Provides the validated axis configuration, the quantities derived from it
//! (travel limits, step timing) and TOML loading with the `std` feature.

mod limits;
mod motor;
mod timing;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use limits::TravelLimits;
pub use motor::{
    MotorConfig, DEFAULT_LIMIT, DEFAULT_SPEED, DEFAULT_STEPS_PER_REVOLUTION,
    DEFAULT_WRAP_REVOLUTIONS,
};
pub use timing::StepTiming;
pub use validation::validate_motor;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Microsteps, Rpm, Steps};
