//! Cancellation tied to a consumer's lifetime.
//!
//! A screen holds a [`CancelGuard`]; dropping it cancels the token every
//! in-flight request of that screen was started with.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Cloneable cancellation handle.
#[derive(Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        // Register with Notify before checking the flag; otherwise a cancel
        // between the check and the await is lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }

    /// Guard that cancels this token when dropped.
    pub fn drop_guard(self) -> CancelGuard {
        CancelGuard { token: self }
    }
}

/// Cancels its token on drop.
pub struct CancelGuard {
    token: CancelToken,
}

impl CancelGuard {
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
