//! # stepper-axis
//!
//! Single-axis motion control for step/direction stepper drivers (TMC22xx
//! and similar) with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **embedded-hal 1.0**: Uses `OutputPin` for DIR/STEP/ENABLE, `DelayNs` for timing
//! - **no_std compatible**: The motion core works without standard library
//! - **Ramped moves**: Approximate trapezoidal profile from a decaying delay term
//! - **Bounded travel**: Motion never leaves `[0, limit)`; the counter wraps at `max_steps`
//! - **Cooperative cancellation**: `halt()` from any context stops the move within one step
//! - **Background moves**: `AsyncMotionController` runs moves on a worker thread (std)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_axis::{MotionController, Steps};
//!
//! let mut axis = MotionController::builder()
//!     .dir_pin(dir_pin)
//!     .step_pin(step_pin)
//!     .enable_pin(enable_pin)
//!     .delay(delay)
//!     .build()?;
//!
//! // Blocks until the axis arrives (or hits its limit)
//! let reached = axis.move_to(Steps(1100))?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables TOML loading and the threaded controller
//! - `alloc`: Heap-shared cancellation token for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets
//! - `log`: Enables logging through the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Logging shims, must come first
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_motor, MotorConfig, StepTiming, TravelLimits};
pub use error::{Error, Result};
pub use motion::{CancelToken, Direction, MotionPhase, MoveExecutor};
pub use motor::{AxisState, EndStop, EndStopPin, MotionController, MotionControllerBuilder, NoEndStop};

#[cfg(feature = "std")]
pub use motor::AsyncMotionController;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Microsteps, Rpm, Steps};
