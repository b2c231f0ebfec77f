//! Connection timeout for status queries
//!
//! Config files and environment variables express the timeout in whole
//! seconds, where `0` means "wait forever". Inside the crate that sentinel
//! becomes an explicit `Unbounded` variant so nothing has to remember it.

use std::str::FromStr;
use std::time::Duration;

use crate::constants::server::DEFAULT_CONNECTION_TIMEOUT;
use crate::types::ValidationError;

/// Upper bound on how long a single status query may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionTimeout {
    /// Give up after this duration
    Bounded(Duration),
    /// Block until the fetcher returns, however long that takes
    Unbounded,
}

impl ConnectionTimeout {
    /// Default timeout (10 seconds)
    pub const DEFAULT: Self = Self::Bounded(DEFAULT_CONNECTION_TIMEOUT);

    /// Build from whole seconds, `0` meaning unbounded
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        if secs == 0 {
            Self::Unbounded
        } else {
            Self::Bounded(Duration::from_secs(secs))
        }
    }

    /// The bound, or None when unbounded
    #[inline]
    #[must_use]
    pub const fn as_duration(self) -> Option<Duration> {
        match self {
            Self::Bounded(d) => Some(d),
            Self::Unbounded => None,
        }
    }

    /// Timeout in seconds, `0` when unbounded
    #[inline]
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        match self {
            Self::Bounded(d) => d.as_secs(),
            Self::Unbounded => 0,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl Default for ConnectionTimeout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<Duration> for ConnectionTimeout {
    fn from(duration: Duration) -> Self {
        if duration.is_zero() {
            Self::Unbounded
        } else {
            Self::Bounded(duration)
        }
    }
}

impl std::fmt::Display for ConnectionTimeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bounded(d) => write!(f, "{:?}", d),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

impl FromStr for ConnectionTimeout {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self::from_secs)
            .map_err(|_| ValidationError::InvalidTimeout(s.to_string()))
    }
}

impl serde::Serialize for ConnectionTimeout {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.as_secs())
    }
}

impl<'de> serde::Deserialize<'de> for ConnectionTimeout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Self::from_secs)
    }
}
