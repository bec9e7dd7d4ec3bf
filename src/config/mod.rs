//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)                 command-line flags
//!     → loader.rs (parse & deserialize)    │
//!     → ProxyConfig ◀──────── overrides ───┘
//!     → validation.rs (semantic checks)
//!     → handed to the workload by value
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, ProxyConfig, ShutdownConfig};
pub use validation::{validate_config, ValidationError};
