//! Configuration loading from files and environment variables
//!
//! Environment variables take precedence over the config file, so container
//! deployments can point the agent at a different searchd without editing it:
//! - `SPHINX_HOST`
//! - `SPHINX_PORT`
//! - `SPHINX_CONNECTION_TIMEOUT` (seconds, `0` = unbounded)
//! - `SPHINX_REPORT_INTERVAL` (seconds)

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;

use super::types::Config;
use crate::constants::env;
use crate::types::{ConnectionTimeout, HostName, Port};

/// Where a loaded configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Read from the given TOML file
    File,
    /// File absent; built from defaults plus environment variables
    Environment,
}

impl ConfigSource {
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::File => "configuration file",
            Self::Environment => "defaults and environment variables",
        }
    }
}

/// Apply overrides looked up through `lookup`
///
/// Returns whether any override was applied. Values that fail to parse are
/// errors rather than being silently ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = false;

    if let Some(host) = lookup(env::HOST) {
        config.server.host =
            HostName::new(host).with_context(|| format!("Invalid {}", env::HOST))?;
        applied = true;
    }

    if let Some(port) = lookup(env::PORT) {
        config.server.port = port
            .parse::<Port>()
            .with_context(|| format!("Invalid {}", env::PORT))?;
        applied = true;
    }

    if let Some(timeout) = lookup(env::CONNECTION_TIMEOUT) {
        config.server.connection_timeout = timeout
            .parse::<ConnectionTimeout>()
            .with_context(|| format!("Invalid {}", env::CONNECTION_TIMEOUT))?;
        applied = true;
    }

    if let Some(interval) = lookup(env::REPORT_INTERVAL) {
        let secs = interval
            .trim()
            .parse::<u64>()
            .with_context(|| format!("Invalid {}: {:?}", env::REPORT_INTERVAL, interval))?;
        config.reporting.interval = Duration::from_secs(secs);
        applied = true;
    }

    Ok(applied)
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Load configuration from a TOML file, with environment variable overrides
pub fn load_config(config_path: impl AsRef<Path>) -> Result<Config> {
    let config_path = config_path.as_ref();
    let config_content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file '{}'", config_path.display()))?;

    let mut config: Config = toml::from_str(&config_content)
        .with_context(|| format!("Failed to parse config file '{}'", config_path.display()))?;

    if apply_env_overrides(&mut config, process_env)? {
        tracing::info!("Applied SPHINX_* environment overrides to config file settings");
    }

    config.validate()?;
    Ok(config)
}

/// Build configuration from defaults and environment variables only
pub fn load_config_from_env() -> Result<Config> {
    let mut config = create_default_config();
    apply_env_overrides(&mut config, process_env)?;
    config.validate()?;
    Ok(config)
}

/// Load from `config_path` if it exists, otherwise from the environment
pub fn load_config_with_fallback(config_path: impl AsRef<Path>) -> Result<(Config, ConfigSource)> {
    let config_path = config_path.as_ref();
    if config_path.exists() {
        return Ok((load_config(config_path)?, ConfigSource::File));
    }

    tracing::info!(
        "Config file '{}' not found, using {}",
        config_path.display(),
        ConfigSource::Environment.description()
    );
    Ok((load_config_from_env()?, ConfigSource::Environment))
}

/// Create a default configuration (local searchd, bounded timeout)
#[must_use]
pub fn create_default_config() -> Config {
    Config::default()
}
