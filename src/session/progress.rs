//! Progress callback surface for the trim invocation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::session::TrimOutcome;

/// Callback trait implemented by the host to observe a running trim
pub trait TrimProgress: Send + Sync {
    /// Invocation started
    fn on_start(&self) {}

    /// Time-based progress, `elapsed / selected duration`, clamped to 0..=1
    fn on_progress(&self, _fraction: f64) {}

    /// A log line from the external tool
    fn on_log(&self, _message: &str) {}

    /// Terminal outcome; called exactly once
    fn on_complete(&self, _outcome: &TrimOutcome) {}

    /// Polled cooperatively by the executor; returning true asks the external
    /// tool to quit. The tool is never force-killed
    fn should_cancel(&self) -> bool {
        false
    }
}

/// No-op observer
pub struct NullProgress;

impl TrimProgress for NullProgress {}

/// Shared cancellation flag, the usual `should_cancel` backing store
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cooperative cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
