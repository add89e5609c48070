// src/supervisor/token.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// Per-run cancellation token shared between the caller (e.g. a cancel
/// button or a Ctrl-C handler) and the supervisor's read loop.
///
/// The token carries two signals:
/// - an atomic flag, checked once per output line by the read loop, so
///   cancellation latency is bounded by the gap between two lines;
/// - a notifier, which wakes the loop even when the child produces no
///   further output, so a silent child can still be killed.
///
/// `request()` is idempotent and inert when no run is active: the supervisor
/// clears the token at the start of each run.
#[derive(Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    requested: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the run this token was handed to.
    ///
    /// Safe to call at any time, from any task or thread, any number of
    /// times.
    pub fn request(&self) {
        self.inner.requested.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_requested(&self) -> bool {
        self.inner.requested.load(Ordering::SeqCst)
    }

    /// Reset the token. Called by the supervisor when a run starts and when
    /// a cancellation is honoured.
    pub(crate) fn clear(&self) {
        self.inner.requested.store(false, Ordering::SeqCst);
    }

    /// Resolve once cancellation has been requested.
    pub(crate) async fn requested(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_requested() {
                return;
            }
            notified.await;
        }
    }
}
