//! Shutdown coordination for the process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// Owner of the process-wide shutdown signal.
///
/// Fires at most once. Every clone shares the same state, so any holder may
/// call [`Shutdown::trigger`]; only the first call has an effect.
#[derive(Debug, Clone)]
pub struct Shutdown {
    fired: Arc<AtomicBool>,
    token: CancellationToken,
}

impl Shutdown {
    /// Create a new shutdown coordinator in the pending state.
    pub fn new() -> Self {
        Self {
            fired: Arc::new(AtomicBool::new(false)),
            token: CancellationToken::new(),
        }
    }

    /// Observe-only handle for long-running tasks.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            token: self.token.clone(),
        }
    }

    /// Fire the shutdown signal.
    ///
    /// Returns `true` for the call that moved the signal from pending to
    /// fired, `false` for every call after it.
    pub fn trigger(&self) -> bool {
        if self.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        self.token.cancel();
        true
    }

    /// Whether the signal has fired.
    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of a [`Shutdown`].
///
/// Cheap to clone; hand one to every task that must stop when the process
/// is asked to terminate.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    token: CancellationToken,
}

impl ShutdownSignal {
    /// Whether the signal has fired.
    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait until the signal fires. Completes immediately if it already has.
    pub async fn wait(&self) {
        self.token.cancelled().await
    }

    /// Owned variant of [`ShutdownSignal::wait`], for APIs that need a
    /// `'static` future such as axum's graceful shutdown.
    pub async fn wait_owned(self) {
        self.token.cancelled_owned().await
    }

    /// A child token cancelled together with this signal.
    ///
    /// Cancelling the child does not fire the parent signal.
    pub fn token(&self) -> CancellationToken {
        self.token.child_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_trigger_fires_once() {
        let shutdown = Shutdown::new();
        assert!(!shutdown.is_triggered());

        assert!(shutdown.trigger());
        assert!(!shutdown.trigger());
        assert!(!shutdown.clone().trigger());
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn test_all_waiters_observe_single_firing() {
        let shutdown = Shutdown::new();

        let waiters: Vec<_> = (0..8)
            .map(|_| {
                let signal = shutdown.signal();
                tokio::spawn(async move {
                    signal.wait().await;
                    signal.is_triggered()
                })
            })
            .collect();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(shutdown.trigger());

        for waiter in waiters {
            let observed = tokio::time::timeout(Duration::from_secs(1), waiter)
                .await
                .expect("waiter should wake")
                .unwrap();
            assert!(observed);
        }
    }

    #[tokio::test]
    async fn test_late_reader_sees_fired_signal() {
        let shutdown = Shutdown::new();
        shutdown.trigger();

        let signal = shutdown.signal();
        assert!(signal.is_triggered());
        tokio::time::timeout(Duration::from_millis(100), signal.wait())
            .await
            .expect("wait on a fired signal returns immediately");
    }

    #[test]
    fn test_child_token_does_not_fire_parent() {
        let shutdown = Shutdown::new();
        let signal = shutdown.signal();

        signal.token().cancel();
        assert!(!signal.is_triggered());

        shutdown.trigger();
        assert!(signal.token().is_cancelled());
    }
}
