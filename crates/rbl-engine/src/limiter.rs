//! Bounded-parallelism task scheduler.
//!
//! Tasks submitted beyond the capacity wait in FIFO order (the semaphore is
//! fair) and start as soon as any running task finishes, whether it
//! succeeded, failed or panicked: the permit is released on drop.
//!
//! Only `tokio::sync` primitives are used, which work on any executor.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

/// Default number of concurrently running tasks.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Upper bound on the configurable capacity.
pub const MAX_CONCURRENCY: usize = 1024;

/// Runs at most `capacity` submitted futures at a time.
#[derive(Debug)]
pub struct ConcurrencyLimiter {
    permits: Semaphore,
    capacity: usize,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl Default for ConcurrencyLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

/// Tracks one running task; decrements the active count on drop.
struct Running<'a>(&'a ConcurrencyLimiter);

impl<'a> Running<'a> {
    fn enter(limiter: &'a ConcurrencyLimiter) -> Self {
        let now = limiter.active.fetch_add(1, Ordering::SeqCst) + 1;
        limiter.peak.fetch_max(now, Ordering::SeqCst);
        Self(limiter)
    }
}

impl Drop for Running<'_> {
    fn drop(&mut self) {
        self.0.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ConcurrencyLimiter {
    /// Create a limiter; capacity is clamped to `1..=MAX_CONCURRENCY`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_CONCURRENCY);
        Self {
            permits: Semaphore::new(capacity),
            capacity,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Run `task` once a slot is free and return its output.
    ///
    /// The task is queued when the returned future is first polled.
    pub async fn submit<F>(&self, task: F) -> F::Output
    where
        F: Future,
    {
        // The semaphore is private and never closed, so acquire cannot fail.
        let _permit = self.permits.acquire().await.ok();
        let _running = Running::enter(self);
        task.await
    }

    /// Wait until every task queued before this call has finished.
    pub async fn drain(&self) {
        // capacity <= MAX_CONCURRENCY, so it fits in a u32
        #[allow(clippy::cast_possible_truncation)]
        let all = self.capacity as u32;
        let _all = self.permits.acquire_many(all).await.ok();
    }

    /// Configured capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tasks running right now.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Highest number of tasks that ever ran at once.
    #[must_use]
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}
