//! # Counting signal.
//!
//! Accumulating wakeup counter. Every [`Signal::post`] is matched by exactly one
//! completed [`Signal::wait`], regardless of which happens first.

use tokio::select;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Counting signal backed by a zero-permit semaphore.
#[derive(Debug)]
pub struct Signal {
    permits: Semaphore,
}

impl Default for Signal {
    fn default() -> Self {
        Self::new()
    }
}

impl Signal {
    /// Creates a signal with no pending posts.
    pub fn new() -> Self {
        Self {
            permits: Semaphore::new(0),
        }
    }

    /// Adds one wakeup. Never blocks.
    pub fn post(&self) {
        self.permits.add_permits(1);
    }

    /// Consumes one wakeup, blocking until one is available.
    pub async fn wait(&self) {
        // The semaphore is never closed, so acquire only fails if that changes.
        if let Ok(permit) = self.permits.acquire().await {
            permit.forget();
        }
    }

    /// Like [`wait`](Self::wait), but gives up when `token` is cancelled.
    ///
    /// Returns `true` if a wakeup was consumed. A cancelled wait consumes nothing.
    pub async fn wait_or_cancel(&self, token: &CancellationToken) -> bool {
        select! {
            _ = self.wait() => true,
            _ = token.cancelled() => false,
        }
    }

    /// Consumes one pending wakeup without blocking.
    ///
    /// Returns `false` if no post was pending.
    pub fn try_take(&self) -> bool {
        match self.permits.try_acquire() {
            Ok(permit) => {
                permit.forget();
                true
            }
            Err(_) => false,
        }
    }

    /// Number of posts not yet consumed.
    pub fn pending(&self) -> usize {
        self.permits.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_post_before_wait_is_kept() {
        let s = Signal::new();
        s.post();
        s.post();
        assert_eq!(s.pending(), 2);
        s.wait().await;
        assert_eq!(s.pending(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_blocks_until_post() {
        let s = Arc::new(Signal::new());
        let waiter = {
            let s = Arc::clone(&s);
            tokio::spawn(async move { s.wait().await })
        };

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!waiter.is_finished());

        s.post();
        waiter.await.expect("waiter panicked");
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_try_take() {
        let s = Signal::new();
        assert!(!s.try_take());
        s.post();
        assert!(s.try_take());
        assert_eq!(s.pending(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_wait_consumes_nothing() {
        let s = Signal::new();
        let token = CancellationToken::new();
        token.cancel();
        assert!(!s.wait_or_cancel(&token).await);

        s.post();
        assert_eq!(s.pending(), 1);
    }
}
