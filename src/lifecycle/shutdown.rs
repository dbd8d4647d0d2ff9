//! Shutdown coordination for the accept loop.

use std::future::Future;

use tokio::sync::watch;

/// One-shot trigger for graceful shutdown.
///
/// Waiters created before or after the trigger both observe it; triggering twice
/// is a no-op.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    /// Create a new, untriggered coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// A future that completes once [`trigger`](Self::trigger) has been called.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            // Err only when the coordinator is dropped, which also ends the wait.
            let _ = rx.wait_for(|triggered| *triggered).await;
        }
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
