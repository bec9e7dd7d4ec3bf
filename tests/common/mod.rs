//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use proxy_lifecycle::{RunError, ShutdownSignal, Workload};

/// Workload that finishes on its own with a fixed result.
pub struct Completes(pub Result<(), String>);

impl Workload for Completes {
    async fn run(self, _shutdown: ShutdownSignal) -> Result<(), RunError> {
        self.0.map_err(RunError::workload)
    }
}

/// Workload that ticks until shutdown, then optionally fails while stopping.
pub struct UntilShutdown {
    pub ticks: Arc<AtomicU32>,
    pub fail_on_stop: Option<&'static str>,
}

impl UntilShutdown {
    pub fn new() -> Self {
        Self {
            ticks: Arc::new(AtomicU32::new(0)),
            fail_on_stop: None,
        }
    }

    pub fn failing(detail: &'static str) -> Self {
        Self {
            fail_on_stop: Some(detail),
            ..Self::new()
        }
    }
}

impl Workload for UntilShutdown {
    async fn run(self, shutdown: ShutdownSignal) -> Result<(), RunError> {
        let mut ticker = tokio::time::interval(Duration::from_millis(5));
        loop {
            tokio::select! {
                _ = shutdown.wait() => break,
                _ = ticker.tick() => {
                    self.ticks.fetch_add(1, Ordering::SeqCst);
                }
            }
        }
        match self.fail_on_stop {
            Some(detail) => Err(RunError::workload(detail)),
            None => Ok(()),
        }
    }
}

/// An unused local port.
pub async fn free_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Poll `url` until it answers, or panic after a few seconds.
pub async fn wait_until_up(client: &reqwest::Client, url: &str) {
    for _ in 0..100 {
        if client.get(url).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("{url} never came up");
}
