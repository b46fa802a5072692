//! Motion module for stepper-axis.
//!
//! Provides the acceleration ramp, per-step move planning and cooperative
//! cancellation.

mod cancel;
mod executor;
mod profile;

pub use cancel::CancelToken;
pub use executor::{MoveExecutor, PlannedStep};
pub use profile::{
    Direction, MotionPhase, Ramp, DECELERATION_WINDOW, RAMP_INCREMENT_US, RAMP_START_US,
};
