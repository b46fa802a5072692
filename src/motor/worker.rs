//! Asynchronous moves on a worker thread (std only).
//!
//! The controller lives behind a mutex held by the worker for the length of
//! a move. Cancellation goes through the shared [`CancelToken`] and never
//! needs the lock, so `halt()` can interrupt a move from the caller's thread.

use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::Steps;
use crate::error::{Error, MotorError, Result};
use crate::motion::CancelToken;

use super::driver::MotionController;
use super::endstop::{EndStop, NoEndStop};

type Shared<DIR, STEP, EN, DELAY, END> = Arc<Mutex<MotionController<DIR, STEP, EN, DELAY, END>>>;

/// Controller that can run moves in the background.
///
/// At most one move is in flight; starting another while it runs fails with
/// [`MotorError::Busy`]. Dropping the controller cancels and joins any
/// running move.
pub struct AsyncMotionController<DIR, STEP, EN, DELAY, END = NoEndStop>
where
    DIR: OutputPin + Send + 'static,
    STEP: OutputPin + Send + 'static,
    EN: OutputPin + Send + 'static,
    DELAY: DelayNs + Send + 'static,
    END: EndStop + Send + 'static,
{
    shared: Shared<DIR, STEP, EN, DELAY, END>,
    token: CancelToken,
    worker: Option<JoinHandle<Result<Steps>>>,
}

impl<DIR, STEP, EN, DELAY, END> AsyncMotionController<DIR, STEP, EN, DELAY, END>
where
    DIR: OutputPin + Send + 'static,
    STEP: OutputPin + Send + 'static,
    EN: OutputPin + Send + 'static,
    DELAY: DelayNs + Send + 'static,
    END: EndStop + Send + 'static,
{
    /// Wrap a built controller.
    pub fn new(controller: MotionController<DIR, STEP, EN, DELAY, END>) -> Self {
        let token = controller.cancel_token();
        Self {
            shared: Arc::new(Mutex::new(controller)),
            token,
            worker: None,
        }
    }

    /// Lock the controller for inspection or configuration.
    ///
    /// Blocks while a move is running.
    pub fn controller(&self) -> Result<MutexGuard<'_, MotionController<DIR, STEP, EN, DELAY, END>>> {
        self.shared
            .lock()
            .map_err(|_| Error::Motor(MotorError::Poisoned))
    }

    /// Whether a move is in progress.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.token.is_moving()
    }

    /// A handle that can stop the running move from any thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Start a move to `target` and return immediately.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::Busy` if a move is still running.
    pub fn async_move_to(&mut self, target: impl Into<Steps>) -> Result<()> {
        self.ensure_idle()?;
        self.controller()?.set_target(target);
        self.spawn()
    }

    /// Start a move to the previously set target and return immediately.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::Busy` if a move is still running.
    pub fn async_move(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.spawn()
    }

    /// Block until the background move finishes and return its final
    /// position. Without a background move, returns the current position.
    pub fn wait(&mut self) -> Result<Steps> {
        match self.worker.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| Error::Motor(MotorError::WorkerPanicked))?,
            None => Ok(self.controller()?.position()),
        }
    }

    /// Stop any running move and de-energize the driver.
    ///
    /// Returns once the worker has left its loop and the lines are high.
    pub fn halt(&self) -> Result<()> {
        self.token.cancel();
        self.controller()?.halt()
    }

    /// Move to `target` on the calling thread.
    pub fn move_to(&mut self, target: impl Into<Steps>) -> Result<Steps> {
        self.ensure_idle()?;
        self.controller()?.move_to(target)
    }

    /// Take a single correction step on the calling thread.
    pub fn nudge(&mut self) -> Result<Steps> {
        self.ensure_idle()?;
        self.controller()?.nudge()
    }

    fn ensure_idle(&mut self) -> Result<()> {
        if let Some(handle) = &self.worker {
            if !handle.is_finished() {
                return Err(MotorError::Busy.into());
            }
        }

        // a finished move nobody waited for; its result is stale
        if let Some(handle) = self.worker.take() {
            if !matches!(handle.join(), Ok(Ok(_))) {
                warn!("Discarding failed background move");
            }
        }

        Ok(())
    }

    fn spawn(&mut self) -> Result<()> {
        self.token.start();

        let shared = Arc::clone(&self.shared);
        self.worker = Some(thread::spawn(move || {
            let mut controller = shared
                .lock()
                .map_err(|_| Error::Motor(MotorError::Poisoned))?;
            controller.run_move()
        }));

        Ok(())
    }
}

impl<DIR, STEP, EN, DELAY, END> Drop for AsyncMotionController<DIR, STEP, EN, DELAY, END>
where
    DIR: OutputPin + Send + 'static,
    STEP: OutputPin + Send + 'static,
    EN: OutputPin + Send + 'static,
    DELAY: DelayNs + Send + 'static,
    END: EndStop + Send + 'static,
{
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}
