//! Error types for status queries
//!
//! Fetcher implementations report transport and protocol failures through
//! this type, so the data source can log them consistently without knowing
//! how the status was actually queried.

use std::fmt;
use std::time::Duration;

/// Errors that can occur while querying searchd for its status
#[derive(Debug)]
#[non_exhaustive]
pub enum FetchError {
    /// TCP connection to searchd failed
    Connect {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    /// The query did not finish within the configured connection timeout
    Timeout {
        host: String,
        port: u16,
        timeout: Duration,
    },

    /// searchd answered, but not with a usable status table
    Protocol {
        host: String,
        port: u16,
        reason: String,
    },

    /// I/O error during communication
    Io(std::io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect { host, port, source } => {
                write!(f, "Failed to connect to {}:{}: {}", host, port, source)
            }
            Self::Timeout {
                host,
                port,
                timeout,
            } => {
                write!(
                    f,
                    "Status query to {}:{} timed out after {:?}",
                    host, port, timeout
                )
            }
            Self::Protocol { host, port, reason } => {
                write!(
                    f,
                    "Invalid status response from {}:{}: {}",
                    host, port, reason
                )
            }
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Connect { source, .. } => Some(source),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl FetchError {
    /// Check if this is a network connectivity error
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Connect { .. } | Self::Timeout { .. })
    }

    /// Check if the server answered with something unusable
    #[must_use]
    pub const fn is_protocol_error(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }

    /// Get the appropriate log level for this error
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        match self {
            // A misbehaving server needs attention
            Self::Protocol { .. } => tracing::Level::ERROR,
            // searchd being briefly unreachable is routine during restarts
            Self::Connect { .. } | Self::Timeout { .. } | Self::Io(_) => tracing::Level::WARN,
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
