//! Configuration type definitions

use crate::status::StatusTarget;
use crate::types::{ConnectionTimeout, HostName, Port, duration_serde};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main agent configuration
///
/// ```toml
/// [server]
/// host = "127.0.0.1"
/// port = 9312
/// connection_timeout = 10   # seconds, 0 = wait forever
///
/// [reporting]
/// interval = 60             # seconds
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// searchd instance to poll
    #[serde(default)]
    pub server: ServerConfig,
    /// Reporting cadence
    #[serde(default)]
    pub reporting: ReportingConfig,
}

impl Config {
    /// Status target derived from the server section
    #[must_use]
    pub fn target(&self) -> StatusTarget {
        self.server.target()
    }
}

/// Connection settings for the polled searchd
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "super::defaults::host")]
    pub host: HostName,
    #[serde(default = "super::defaults::port")]
    pub port: Port,
    /// Bound on one status query in seconds; `0` opts into no bound at all
    #[serde(default = "super::defaults::connection_timeout")]
    pub connection_timeout: ConnectionTimeout,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: super::defaults::host(),
            port: super::defaults::port(),
            connection_timeout: super::defaults::connection_timeout(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn target(&self) -> StatusTarget {
        StatusTarget::new(self.host.clone(), self.port, self.connection_timeout)
    }
}

/// How often cycles are collected and published
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportingConfig {
    /// Seconds between two reporting cycles
    #[serde(with = "duration_serde", default = "super::defaults::report_interval")]
    pub interval: Duration,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            interval: super::defaults::report_interval(),
        }
    }
}
