//! Shared fakes for integration tests.
//!
//! `embedded-hal-mock` pins need every transaction spelled out up front,
//! which is impractical for moves of hundreds of steps. These fakes record
//! what was written instead so tests can assert on the outcome.

#![allow(dead_code)]

use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use stepper_axis::{MotionController, MotionControllerBuilder, MotorConfig, Steps};

/// Output pin that records every level written. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingPin {
    writes: Arc<Mutex<Vec<bool>>>,
}

impl RecordingPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<bool> {
        self.writes.lock().unwrap().clone()
    }

    pub fn level(&self) -> Option<bool> {
        self.writes.lock().unwrap().last().copied()
    }

    /// Number of low-to-high transitions, starting from the first write.
    pub fn rising_edges(&self) -> usize {
        self.writes()
            .windows(2)
            .filter(|w| !w[0] && w[1])
            .count()
    }

    pub fn clear(&self) {
        self.writes.lock().unwrap().clear();
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.writes.lock().unwrap().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.writes.lock().unwrap().push(true);
        Ok(())
    }
}

/// Delay that returns immediately and records each request in µs.
#[derive(Debug, Clone, Default)]
pub struct RecordingDelay {
    calls: Arc<Mutex<Vec<u32>>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls_us(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.lock().unwrap().push(ns / 1000);
    }

    fn delay_us(&mut self, us: u32) {
        self.calls.lock().unwrap().push(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.lock().unwrap().push(ms * 1000);
    }
}

/// Delay backed by `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepDelay;

impl DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(ns as u64));
    }
}

/// End-stop sensor that counts polls and trips after `trip_after` of them.
#[derive(Debug, Clone)]
pub struct CountingEndStop {
    polls: Arc<AtomicUsize>,
    trip_after: usize,
}

impl CountingEndStop {
    pub fn new(trip_after: usize) -> Self {
        Self {
            polls: Arc::new(AtomicUsize::new(0)),
            trip_after,
        }
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }

    /// Record a poll; `true` once tripped.
    pub fn poll(&self) -> bool {
        self.polls.fetch_add(1, Ordering::SeqCst) >= self.trip_after
    }

    /// Closure suitable for `end_stop()`.
    pub fn hook(&self) -> impl FnMut() -> bool + Send + 'static {
        let this = self.clone();
        move || this.poll()
    }
}

/// Pins of a test axis, kept so tests can inspect them after building.
#[derive(Debug, Clone, Default)]
pub struct Lines {
    pub dir: RecordingPin,
    pub step: RecordingPin,
    pub enable: RecordingPin,
    pub delay: RecordingDelay,
}

impl Lines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder(&self) -> MotionControllerBuilder<RecordingPin, RecordingPin, RecordingPin, RecordingDelay> {
        MotionController::builder()
            .dir_pin(self.dir.clone())
            .step_pin(self.step.clone())
            .enable_pin(self.enable.clone())
            .delay(self.delay.clone())
    }

    pub fn clear(&self) {
        self.dir.clear();
        self.step.clear();
        self.enable.clear();
        self.delay.clear();
    }
}

pub type TestAxis = MotionController<RecordingPin, RecordingPin, RecordingPin, RecordingDelay>;

/// Build an axis at `position` with `config`, and return its lines.
pub fn axis_at(position: i64, config: MotorConfig) -> (TestAxis, Lines) {
    let lines = Lines::new();
    let axis = lines
        .builder()
        .config(config)
        .position(Steps(position))
        .build()
        .expect("valid test axis");
    (axis, lines)
}
