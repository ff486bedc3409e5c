//! Batch-wide ceiling on outstanding morphology requests.
//!
//! [`ConcurrencyLimiter`] wraps a `tokio::sync::Semaphore`, which hands out
//! permits in FIFO order. A permit is an RAII guard: it goes back to the
//! pool when dropped, whether the fetch succeeded, failed, panicked or its
//! task was aborted.
//!
//! Each orchestrator owns its own limiter, so independent runs never share
//! a ceiling.

use std::sync::Arc;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Guard for one in-flight request slot.
pub type FetchPermit = OwnedSemaphorePermit;

#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl ConcurrencyLimiter {
    /// Create a limiter with `limit` slots. A limit of zero would deadlock
    /// every fetch, so it is raised to one.
    pub fn new(limit: usize) -> Self {
        let limit = if limit == 0 {
            log::warn!("limiter: concurrency limit of 0 raised to 1");
            1
        } else {
            limit.min(Semaphore::MAX_PERMITS)
        };

        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Wait for a free slot.
    ///
    /// Fails only if the semaphore was closed, which this type never does.
    pub async fn acquire(&self) -> Result<FetchPermit, AcquireError> {
        Arc::clone(&self.semaphore).acquire_owned().await
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Slots currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
