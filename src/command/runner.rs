//! Command execution against the shutdown signal.

use std::future::Future;

use tracing::Instrument;

use crate::command::outcome::Outcome;
use crate::error::RunError;
use crate::lifecycle::ShutdownSignal;

/// A long-running unit of work that stops cooperatively.
///
/// Implementations must watch `shutdown` at every wait or iteration and
/// return once it fires. Returning `Ok(())` after a shutdown is a clean stop.
/// Any bound on how long stopping may take is enforced by the workload.
pub trait Workload {
    fn run(self, shutdown: ShutdownSignal) -> impl Future<Output = Result<(), RunError>> + Send;
}

/// A workload bound to the process shutdown signal, not yet started.
#[derive(Debug)]
pub struct Command<W> {
    shutdown: ShutdownSignal,
    workload: W,
}

impl<W: Workload> Command<W> {
    /// Wire the shutdown signal into `workload`. Nothing runs yet.
    pub fn build(shutdown: ShutdownSignal, workload: W) -> Self {
        Self { shutdown, workload }
    }

    /// Run the workload to completion and report how it ended.
    ///
    /// Returns once the workload has finished its own shutdown, which makes
    /// the return the point after which the process may exit.
    pub async fn run(self) -> Outcome {
        let Self { shutdown, workload } = self;

        let result = workload
            .run(shutdown.clone())
            .instrument(tracing::info_span!("run"))
            .await;

        let requested = shutdown.is_triggered();
        match &result {
            Ok(()) if requested => tracing::info!("Stopped after termination request"),
            Ok(()) => tracing::info!("Workload completed"),
            Err(e) => tracing::error!(error = %e, shutdown_requested = requested, "Workload failed"),
        }

        Outcome::from(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct Recorder {
        started: Arc<AtomicBool>,
    }

    impl Workload for Recorder {
        async fn run(self, shutdown: ShutdownSignal) -> Result<(), RunError> {
            self.started.store(true, Ordering::SeqCst);
            shutdown.wait().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_build_does_not_start_workload() {
        let shutdown = Shutdown::new();
        let started = Arc::new(AtomicBool::new(false));
        let command = Command::build(
            shutdown.signal(),
            Recorder {
                started: started.clone(),
            },
        );

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!started.load(Ordering::SeqCst));

        shutdown.trigger();
        assert_eq!(command.run().await, Outcome::Success);
        assert!(started.load(Ordering::SeqCst));
    }

    struct FailsAfterShutdown;

    impl Workload for FailsAfterShutdown {
        async fn run(self, shutdown: ShutdownSignal) -> Result<(), RunError> {
            shutdown.wait().await;
            Err(RunError::workload("flush failed"))
        }
    }

    #[tokio::test]
    async fn test_error_during_shutdown_is_failure() {
        let shutdown = Shutdown::new();
        shutdown.trigger();

        let outcome = Command::build(shutdown.signal(), FailsAfterShutdown)
            .run()
            .await;
        assert_eq!(outcome, Outcome::Failure("flush failed".into()));
    }
}
