//! OS signal handling.
//!
//! # Responsibilities
//! - Register termination handlers (SIGINT, SIGTERM; Ctrl-C off unix)
//! - Translate every delivered request into the one-shot [`Shutdown`]
//! - Count deliveries so the entry point can decide how to treat repeats
//!
//! # Design Decisions
//! - Handlers are registered synchronously inside `install()`, so a request
//!   that arrives after `install()` returns is never lost
//! - One listener task per OS channel
//! - Repeated requests are logged and counted, never escalated here

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use crate::lifecycle::shutdown::{Shutdown, ShutdownSignal};

/// Set by the first successful `install()` in this process.
static INSTALLED: AtomicBool = AtomicBool::new(false);

/// A termination request delivered by the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationRequest {
    Interrupt,
    Terminate,
}

impl fmt::Display for TerminationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationRequest::Interrupt => write!(f, "SIGINT"),
            TerminationRequest::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Error type for signal bridge installation.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("signal handlers are already installed in this process")]
    AlreadyInstalled,

    #[error("failed to register {signal} handler: {source}")]
    Register {
        signal: TerminationRequest,
        #[source]
        source: std::io::Error,
    },
}

/// Routes deliveries from the listener tasks into the shutdown signal.
#[derive(Debug, Clone)]
struct Relay {
    shutdown: Shutdown,
    requests: Arc<watch::Sender<u32>>,
}

impl Relay {
    fn new() -> (Self, watch::Receiver<u32>) {
        let (tx, rx) = watch::channel(0);
        let relay = Self {
            shutdown: Shutdown::new(),
            requests: Arc::new(tx),
        };
        (relay, rx)
    }

    fn deliver(&self, request: TerminationRequest) {
        let mut delivered = 0;
        self.requests.send_modify(|count| {
            *count = count.saturating_add(1);
            delivered = *count;
        });

        if self.shutdown.trigger() {
            tracing::info!(signal = %request, "Received termination request, shutting down gracefully");
        } else {
            tracing::warn!(
                signal = %request,
                requests = delivered,
                "Received repeated termination request, shutdown already in progress"
            );
        }
    }
}

/// Process-wide bridge from OS termination requests to a [`ShutdownSignal`].
#[derive(Debug)]
pub struct SignalBridge {
    shutdown: Shutdown,
    requests: watch::Receiver<u32>,
}

impl SignalBridge {
    /// Register termination handlers and start the listener tasks.
    ///
    /// Must be called from within a Tokio runtime, at most once per process.
    pub fn install() -> Result<Self, SignalError> {
        if INSTALLED.swap(true, Ordering::AcqRel) {
            return Err(SignalError::AlreadyInstalled);
        }

        let (relay, requests) = Relay::new();
        if let Err(e) = spawn_listeners(&relay) {
            INSTALLED.store(false, Ordering::Release);
            return Err(e);
        }

        tracing::debug!("Termination handlers installed");
        Ok(Self::from_relay(relay, requests))
    }

    fn from_relay(relay: Relay, requests: watch::Receiver<u32>) -> Self {
        Self {
            shutdown: relay.shutdown,
            requests,
        }
    }

    /// Observe-only handle to the shutdown signal.
    pub fn signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Number of termination requests delivered so far.
    pub fn requests(&self) -> u32 {
        *self.requests.borrow()
    }

    /// Completes once a second termination request has been delivered.
    ///
    /// The returned future does not borrow the bridge, so it can be moved
    /// into a spawned task.
    pub fn repeated(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut requests = self.requests.clone();
        async move {
            if requests.wait_for(|count| *count >= 2).await.is_err() {
                // Listeners are gone; no further request can arrive.
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(unix)]
fn spawn_listeners(relay: &Relay) -> Result<(), SignalError> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut streams = Vec::with_capacity(2);
    for request in [TerminationRequest::Interrupt, TerminationRequest::Terminate] {
        let kind = match request {
            TerminationRequest::Interrupt => SignalKind::interrupt(),
            TerminationRequest::Terminate => SignalKind::terminate(),
        };
        let stream = signal(kind).map_err(|source| SignalError::Register {
            signal: request,
            source,
        })?;
        streams.push((request, stream));
    }

    // Spawn only after every channel registered.
    for (request, mut stream) in streams {
        let relay = relay.clone();
        tokio::spawn(async move {
            while stream.recv().await.is_some() {
                relay.deliver(request);
            }
        });
    }
    Ok(())
}

#[cfg(not(unix))]
fn spawn_listeners(relay: &Relay) -> Result<(), SignalError> {
    let mut ctrl_c = tokio::signal::windows::ctrl_c().map_err(|source| SignalError::Register {
        signal: TerminationRequest::Interrupt,
        source,
    })?;

    let relay = relay.clone();
    tokio::spawn(async move {
        while ctrl_c.recv().await.is_some() {
            relay.deliver(TerminationRequest::Interrupt);
        }
    });
    Ok(())
}
