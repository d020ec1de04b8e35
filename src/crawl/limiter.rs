// src/crawl/limiter.rs
// =============================================================================
// A counting admission gate for outbound network operations.
//
// Every page fetch and every reachability probe runs through a Limiter.
// At most `capacity` operations hold a permit at the same time; the rest
// wait (roughly FIFO, tokio's Semaphore queues waiters in order) until a
// permit is released.
//
// Release is tied to scope: the permit is a guard value that is dropped when
// the wrapped operation finishes, whether it succeeded, failed or panicked.
// =============================================================================

use std::future::Future;
use tokio::sync::{Semaphore, SemaphorePermit};

pub struct Limiter {
    permits: Semaphore,
    capacity: usize,
}

impl Limiter {
    // Capacities above Semaphore::MAX_PERMITS are clamped to it
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(Semaphore::MAX_PERMITS);
        Self {
            permits: Semaphore::new(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently free
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Waits for a permit. The permit goes back to the pool when dropped.
    pub async fn acquire(&self) -> SemaphorePermit<'_> {
        // The semaphore is owned by the limiter and never closed, so acquire
        // can only fail after `close()`, which nothing calls.
        self.permits
            .acquire()
            .await
            .expect("limiter semaphore is never closed")
    }

    /// Runs `op` while holding a permit
    pub async fn run<F: Future>(&self, op: F) -> F::Output {
        let _permit = self.acquire().await;
        op.await
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is a SemaphorePermit?
//    - A guard value: while it lives, one slot of the semaphore is taken
//    - Dropping it (end of scope, early return, `?`, panic) frees the slot
//
// 2. Why `let _permit` and not `let _`?
//    - `let _ = ...` drops the value immediately, releasing the permit
//      before the operation even starts
//    - `let _permit = ...` keeps it alive until the end of the block
// -----------------------------------------------------------------------------
