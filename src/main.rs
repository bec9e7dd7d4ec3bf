//! Proxy process entry point.
//!
//! # Startup Order
//!
//! ```text
//!   SignalBridge::install()        termination handlers live before anything else runs
//!          │
//!          ▼
//!   RunArgs::parse() + logging     flags, tracing subscriber
//!          │
//!          ▼
//!   Command::build(signal, args)   wiring only, no work yet
//!          │
//!          ▼
//!   Command::run().await           blocks for the lifetime of the server
//!          │
//!          ▼
//!   Outcome::report()              Success → 0, Failure → "error: …" on stderr, 1
//! ```

use std::future::Future;
use std::process::ExitCode;

use clap::Parser;

use proxy_lifecycle::command::{Command, Outcome, RunArgs, FAILURE_STATUS};
use proxy_lifecycle::lifecycle::SignalBridge;
use proxy_lifecycle::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let bridge = match SignalBridge::install() {
        Ok(bridge) => bridge,
        Err(e) => return Outcome::failure(e).report(),
    };

    let args = RunArgs::parse();
    logging::init(&args.log_filter);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "proxy-lifecycle starting");

    if args.force_exit_on_repeat {
        tokio::spawn(force_exit_on_repeat(bridge.repeated()));
    }

    let outcome = Command::build(bridge.signal(), args).run().await;

    tracing::info!(exit_status = outcome.exit_status(), "Shutdown complete");
    outcome.report()
}

/// Escalate a second termination request into an immediate failed exit.
async fn force_exit_on_repeat(repeated: impl Future<Output = ()>) {
    repeated.await;
    eprintln!("error: received repeated termination request, forcing exit");
    std::process::exit(i32::from(FAILURE_STATUS));
}
