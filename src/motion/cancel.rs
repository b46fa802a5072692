//! Cooperative cancellation of a running move.

use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "alloc")]
use alloc::sync::Arc;

/// Shared "moving" flag.
///
/// The move loop checks it once per logical step; clearing it from any
/// context (another thread, an interrupt handler, the end-stop hook) ends the
/// move before its next step. Clones observe the same flag.
#[derive(Debug, Clone)]
pub struct CancelToken {
    flag: Flag,
}

#[derive(Debug, Clone)]
enum Flag {
    #[cfg(feature = "alloc")]
    Shared(Arc<AtomicBool>),
    Static(&'static AtomicBool),
}

impl CancelToken {
    /// Create a heap-shared token, initially not moving.
    #[cfg(feature = "alloc")]
    pub fn new() -> Self {
        Self {
            flag: Flag::Shared(Arc::new(AtomicBool::new(false))),
        }
    }

    /// Wrap a `'static` flag, e.g. one also visible to an interrupt handler.
    pub const fn from_static(flag: &'static AtomicBool) -> Self {
        Self {
            flag: Flag::Static(flag),
        }
    }

    #[inline]
    fn get(&self) -> &AtomicBool {
        match &self.flag {
            #[cfg(feature = "alloc")]
            Flag::Shared(flag) => flag,
            Flag::Static(flag) => flag,
        }
    }

    /// Whether a move may proceed.
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.get().load(Ordering::Acquire)
    }

    /// Mark a move as in progress.
    #[inline]
    pub fn start(&self) {
        self.get().store(true, Ordering::Release);
    }

    /// Request the running move to stop before its next step.
    #[inline]
    pub fn cancel(&self) {
        self.get().store(false, Ordering::Release);
    }
}

#[cfg(feature = "alloc")]
impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let token = CancelToken::new();
        let other = token.clone();

        assert!(!token.is_moving());
        token.start();
        assert!(other.is_moving());
        other.cancel();
        assert!(!token.is_moving());
    }

    #[test]
    fn test_static_flag() {
        static FLAG: AtomicBool = AtomicBool::new(false);
        let token = CancelToken::from_static(&FLAG);

        token.start();
        assert!(FLAG.load(Ordering::Acquire));
        FLAG.store(false, Ordering::Release);
        assert!(!token.is_moving());
    }
}
