//! Errors a workload can stop with.

use thiserror::Error;

use crate::config::ConfigError;

/// Why a workload stopped unsuccessfully.
///
/// Stopping because the shutdown signal fired is not an error; workloads
/// return `Ok(())` in that case.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("listen failed: {source}")]
    Listen {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serve failed: {0}")]
    Serve(#[source] std::io::Error),

    #[error("{0}")]
    Workload(String),
}

impl RunError {
    /// Free-form workload failure.
    pub fn workload(detail: impl Into<String>) -> Self {
        RunError::Workload(detail.into())
    }
}
