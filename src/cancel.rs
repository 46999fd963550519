//! Cooperative cancellation for long-running route calculations.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::PlanError;

/// Shared flag checked before every road provider call.
///
/// Clones observe the same flag, so a caller can keep one handle and pass
/// another into the planner.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns `Err(PlanError::Cancelled)` once [`cancel`](Self::cancel) has been called.
    pub fn check(&self) -> Result<(), PlanError> {
        if self.is_cancelled() {
            Err(PlanError::Cancelled)
        } else {
            Ok(())
        }
    }
}
