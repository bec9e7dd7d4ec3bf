//! Command-line arguments for the run command.

use std::path::PathBuf;

use clap::Parser;

use crate::command::runner::Workload;
use crate::config::{load_config, validate_config, ConfigError, ProxyConfig};
use crate::error::RunError;
use crate::http::HttpServer;
use crate::lifecycle::ShutdownSignal;

#[derive(Debug, Clone, Parser)]
#[command(name = "proxy-lifecycle")]
#[command(about = "Run the proxy until it is asked to stop", long_about = None)]
pub struct RunArgs {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on, overriding the configuration file.
    #[arg(long)]
    pub bind_address: Option<String>,

    /// Seconds to drain in-flight connections after a termination request.
    #[arg(long)]
    pub drain_timeout_secs: Option<u64>,

    /// Exit immediately with status 1 on a second termination request.
    #[arg(long)]
    pub force_exit_on_repeat: bool,

    /// Tracing filter used when RUST_LOG is unset.
    #[arg(long, default_value = "proxy_lifecycle=info,tower_http=info")]
    pub log_filter: String,
}

impl RunArgs {
    /// Resolve the effective configuration: file or defaults, then flags.
    pub fn into_config(self) -> Result<ProxyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ProxyConfig::default(),
        };

        if let Some(bind_address) = self.bind_address {
            config.listener.bind_address = bind_address;
        }
        if let Some(secs) = self.drain_timeout_secs {
            config.shutdown.drain_timeout_secs = secs;
        }

        // Overrides can break an otherwise valid file.
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

impl Workload for RunArgs {
    async fn run(self, shutdown: ShutdownSignal) -> Result<(), RunError> {
        let config = self.into_config()?;

        tracing::info!(
            bind_address = %config.listener.bind_address,
            drain_timeout_secs = config.shutdown.drain_timeout_secs,
            "Configuration loaded"
        );

        HttpServer::new(config).run(shutdown).await
    }
}
