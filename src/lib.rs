//! Process lifecycle for the proxy: OS termination requests become one
//! cooperative shutdown signal, and the run command reports a single
//! outcome that maps to the exit status.

pub mod command;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use command::{Command, Outcome, RunArgs, Workload};
pub use config::schema::ProxyConfig;
pub use error::RunError;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, ShutdownSignal, SignalBridge};
