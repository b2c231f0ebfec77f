//! Configuration module
//!
//! This module handles configuration types, defaults, loading from TOML
//! files and environment variables, and validation for the status agent.

mod defaults;
mod loading;
mod types;
mod validation;

pub use loading::{
    ConfigSource, apply_env_overrides, create_default_config, load_config, load_config_from_env,
    load_config_with_fallback,
};
pub use types::{Config, ReportingConfig, ServerConfig};

// Re-export default functions for use in tests and other modules
pub use defaults::{connection_timeout, host, port, report_interval};
