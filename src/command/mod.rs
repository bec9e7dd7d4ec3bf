//! Command execution subsystem.
//!
//! # Data Flow
//! ```text
//! ShutdownSignal ─┐
//!                 ├→ Command::build (wiring only)
//! Workload ───────┘
//!     → Command::run (workload runs, watching the signal)
//!     → Outcome (Success | Failure(detail))
//!     → exit status (0 | 1)
//! ```
//!
//! # Design Decisions
//! - Stopping because of a termination request is a success
//! - Workloads are consumed by `run`, so a command runs at most once
//! - The failure detail is written once, by the entry point

pub mod args;
pub mod outcome;
pub mod runner;

pub use args::RunArgs;
pub use outcome::{Outcome, FAILURE_STATUS};
pub use runner::{Command, Workload};
