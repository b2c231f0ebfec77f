//! Contract for the component that actually queries searchd

use async_trait::async_trait;
use std::fmt;

use crate::fetch_error::FetchError;
use crate::types::{ConnectionTimeout, HostName, Port};

/// One `(key, value)` row of the status table
pub type StatusRow = (String, String);

/// Where and how to query status
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StatusTarget {
    pub host: HostName,
    pub port: Port,
    pub connection_timeout: ConnectionTimeout,
}

impl StatusTarget {
    #[must_use]
    pub fn new(host: HostName, port: Port, connection_timeout: ConnectionTimeout) -> Self {
        Self {
            host,
            port,
            connection_timeout,
        }
    }

    /// `host:port`, as used in log lines and errors
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout error for a query against this target
    #[must_use]
    pub fn timeout_error(&self, timeout: std::time::Duration) -> FetchError {
        FetchError::Timeout {
            host: self.host.to_string(),
            port: self.port.get(),
            timeout,
        }
    }
}

impl fmt::Display for StatusTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Queries a search server for its current status table
///
/// Implementations own the wire protocol. They should honour
/// `target.connection_timeout` at the transport level where they can; the
/// data source additionally bounds the whole call by the same timeout.
#[async_trait]
pub trait StatusFetcher: Send + Sync {
    /// Fetch the status table as raw rows
    ///
    /// Values are returned verbatim, including the `"OFF"` sentinel.
    async fn fetch(&self, target: &StatusTarget) -> Result<Vec<StatusRow>, FetchError>;
}
