//! Motor module for stepper-axis.
//!
//! Provides the single-axis controller, its builder, the end-stop hook and,
//! with `std`, the background-move wrapper.

mod builder;
mod driver;
mod endstop;
mod position;
mod state;
#[cfg(feature = "std")]
mod worker;

pub use builder::{MotionControllerBuilder, INITIAL_POSITION};
pub use driver::{MotionController, DEBUG_EVENTS, DEBUG_STEPS, HALT_SETTLE_MS};
pub use endstop::{EndStop, EndStopPin, NoEndStop};
pub use position::Position;
pub use state::AxisState;
#[cfg(feature = "std")]
pub use worker::AsyncMotionController;
