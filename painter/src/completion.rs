//! Completion tracking for submitted operations.
//!
//! DESIGN
//! ======
//! `Pending` counts operations that have been submitted but not yet applied.
//! A submitter takes a [`Ticket`] before enqueueing. If the enqueue fails or
//! is abandoned, dropping the ticket releases the count. Once the operation
//! is in the queue the ticket is handed off and the worker calls
//! [`Pending::complete`] after applying it. The count therefore never drops
//! before the operation has run, and never leaks on a failed submission.

#[cfg(test)]
#[path = "completion_test.rs"]
mod completion_test;

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Shared count of submitted-but-not-yet-applied operations.
#[derive(Debug, Clone, Default)]
pub struct Pending {
    inner: Arc<PendingInner>,
}

#[derive(Debug, Default)]
struct PendingInner {
    count: Mutex<usize>,
    idle: Condvar,
}

impl Pending {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one submission. The returned ticket must be handed off once
    /// the operation is enqueued, or dropped to cancel the registration.
    #[must_use]
    pub fn enter(&self) -> Ticket {
        *self.lock() += 1;
        Ticket { pending: self.clone(), armed: true }
    }

    /// Mark one submitted operation as fully applied.
    pub fn complete(&self) {
        let mut count = self.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.inner.idle.notify_all();
        }
    }

    /// Current number of outstanding operations.
    #[must_use]
    pub fn count(&self) -> usize {
        *self.lock()
    }

    /// Block until the count reaches zero.
    pub fn wait_idle(&self) {
        let count = self.lock();
        let _idle = self
            .inner
            .idle
            .wait_while(count, |n| *n > 0)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Block until the count reaches zero or `timeout` elapses.
    /// Returns `true` if the count reached zero.
    #[must_use]
    pub fn wait_idle_timeout(&self, timeout: Duration) -> bool {
        let count = self.lock();
        let (count, _) = self
            .inner
            .idle
            .wait_timeout_while(count, timeout, |n| *n > 0)
            .unwrap_or_else(PoisonError::into_inner);
        *count == 0
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.inner
            .count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drop guard for one registered submission.
#[derive(Debug)]
pub struct Ticket {
    pending: Pending,
    armed: bool,
}

impl Ticket {
    /// The operation is in the queue; the worker now owns the completion.
    pub fn handoff(mut self) {
        self.armed = false;
    }
}

impl Drop for Ticket {
    fn drop(&mut self) {
        if self.armed {
            self.pending.complete();
        }
    }
}
