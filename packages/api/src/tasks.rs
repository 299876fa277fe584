//! # Cancellable request scopes
//!
//! Every controller owns a [`TaskScope`]. Requests run through
//! [`TaskScope::run`], which wraps them in [`futures::future::Abortable`].
//! When the owning view is torn down it calls [`TaskScope::cancel`]. Every
//! in-flight request then resolves to `Err(Cancelled)` at its next poll, and
//! the controller drops the result instead of writing to state nobody reads.
//!
//! Cancellation is one-way: after `cancel`, every later `run` returns
//! `Err(Cancelled)` without polling its future.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{AbortHandle, Abortable};
use thiserror::Error;

/// A request was dropped because its scope was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("task cancelled")]
pub struct Cancelled;

#[derive(Debug, Default)]
struct ScopeInner {
    cancelled: AtomicBool,
    next_id: AtomicU64,
    in_flight: Mutex<Vec<(u64, AbortHandle)>>,
}

/// Shared cancellation handle. Clones refer to the same scope.
#[derive(Clone, Debug, Default)]
pub struct TaskScope {
    inner: Arc<ScopeInner>,
}

impl TaskScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive `fut` to completion unless the scope is cancelled first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled);
        }

        let (handle, registration) = AbortHandle::new_pair();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.in_flight().push((id, handle));

        // cancel() may have run between the check above and the push
        if self.is_cancelled() {
            self.forget(id);
            return Err(Cancelled);
        }

        let result = Abortable::new(fut, registration).await;
        self.forget(id);
        result.map_err(|_| Cancelled)
    }

    /// Abort everything in flight and refuse new work.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        let handles = std::mem::take(&mut *self.in_flight());
        if !handles.is_empty() {
            tracing::debug!(count = handles.len(), "cancelling in-flight requests");
        }
        for (_, handle) in handles {
            handle.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Number of requests currently running in this scope.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight().len()
    }

    fn in_flight(&self) -> std::sync::MutexGuard<'_, Vec<(u64, AbortHandle)>> {
        self.inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn forget(&self, id: u64) {
        self.in_flight().retain(|(other, _)| *other != id);
    }
}
