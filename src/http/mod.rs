//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, graceful shutdown, drain deadline)
//!     → probes.rs (/healthz, /readyz)
//! ```

pub mod probes;
pub mod server;

pub use server::{AppState, HttpServer};
