//! Validated string types that enforce invariants at construction time

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Validation errors for configuration values
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("hostname cannot be empty or whitespace")]
    EmptyHostName,

    #[error("port cannot be 0")]
    InvalidPort,

    #[error("invalid port number: {0}")]
    UnparsablePort(String),

    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
}

/// A validated searchd hostname that cannot be empty or whitespace-only
///
/// # Examples
/// ```
/// use sphinx_status_agent::types::HostName;
///
/// let host = HostName::new("search.internal".to_string()).unwrap();
/// assert_eq!(host.as_str(), "search.internal");
///
/// assert!(HostName::new("   ".to_string()).is_err());
/// ```
#[doc(alias = "host")]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HostName(String);

impl HostName {
    /// Create a new HostName after validation
    pub fn new(host: String) -> Result<Self, ValidationError> {
        if host.trim().is_empty() {
            return Err(ValidationError::EmptyHostName);
        }
        Ok(Self(host))
    }

    /// Get the hostname as a string slice
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HostName {
    fn default() -> Self {
        Self(crate::constants::server::DEFAULT_HOST.to_string())
    }
}

impl AsRef<str> for HostName {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HostName {
    type Error = ValidationError;

    fn try_from(host: String) -> Result<Self, Self::Error> {
        Self::new(host)
    }
}

impl TryFrom<&str> for HostName {
    type Error = ValidationError;

    fn try_from(host: &str) -> Result<Self, Self::Error> {
        Self::new(host.to_string())
    }
}

impl<'de> Deserialize<'de> for HostName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}
