//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → SignalBridge listener tasks → Shutdown::trigger (first only)
//!
//! Shutdown (shutdown.rs):
//!     Shutdown (fire once) → ShutdownSignal (observe) → every long-running task
//! ```
//!
//! # Design Decisions
//! - The bridge is installed before anything else starts
//! - Cancellation is cooperative: tasks are told to stop, never torn down
//! - A repeated request is counted, not acted on; the entry point decides

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use signals::{SignalBridge, SignalError, TerminationRequest};
