//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the probe handlers
//! - Wire up middleware (tracing)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain for a bounded time

use std::future::IntoFuture;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::command::Workload;
use crate::config::ProxyConfig;
use crate::error::RunError;
use crate::http::probes;
use crate::lifecycle::ShutdownSignal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub shutdown: ShutdownSignal,
}

/// HTTP server for the proxy process.
pub struct HttpServer {
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        Self { config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(probes::healthz))
            .route("/readyz", get(probes::readyz))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Bind the configured listener address.
    pub async fn bind(&self) -> Result<TcpListener, RunError> {
        let address = self.config.listener.bind_address.clone();
        match TcpListener::bind(&address).await {
            Ok(listener) => Ok(listener),
            Err(source) => {
                tracing::error!(address = %address, error = %source, "Failed to bind listener");
                Err(RunError::Listen { address, source })
            }
        }
    }

    /// Serve on an already bound listener until `shutdown` fires.
    ///
    /// After the signal the server stops accepting and waits for open
    /// connections, giving up once the drain timeout has passed.
    pub async fn serve(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), RunError> {
        let addr = listener.local_addr().map_err(RunError::Serve)?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = Self::build_router(AppState {
            shutdown: shutdown.clone(),
        });
        let drain_timeout = Duration::from_secs(self.config.shutdown.drain_timeout_secs);

        let server = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown.clone().wait_owned())
            .into_future();
        let mut server = std::pin::pin!(server);

        tokio::select! {
            result = &mut server => result.map_err(RunError::Serve)?,
            _ = drain_deadline(&shutdown, drain_timeout) => {
                tracing::warn!(
                    drain_timeout_secs = drain_timeout.as_secs(),
                    "Drain timeout elapsed, abandoning open connections"
                );
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

impl Workload for HttpServer {
    async fn run(self, shutdown: ShutdownSignal) -> Result<(), RunError> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown).await
    }
}

/// Completes `drain_timeout` after the shutdown signal fires.
async fn drain_deadline(shutdown: &ShutdownSignal, drain_timeout: Duration) {
    shutdown.wait().await;
    tokio::time::sleep(drain_timeout).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;

    #[tokio::test]
    async fn test_bind_conflict_is_listen_error() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut config = ProxyConfig::default();
        config.listener.bind_address = taken.local_addr().unwrap().to_string();

        let shutdown = Shutdown::new();
        let err = HttpServer::new(config)
            .run(shutdown.signal())
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::Listen { .. }));
        assert!(err.to_string().starts_with("listen failed: "));
    }

    #[tokio::test]
    async fn test_serve_returns_after_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let shutdown = Shutdown::new();
        let server = HttpServer::new(ProxyConfig::default());
        let handle = tokio::spawn(server.serve(listener, shutdown.signal()));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!handle.is_finished());

        shutdown.trigger();
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("server should stop promptly")
            .unwrap();
        assert!(result.is_ok());
    }
}
