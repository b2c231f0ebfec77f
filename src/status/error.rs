//! Errors surfaced by metric reads

use std::fmt;
use thiserror::Error;

use crate::fetch_error::FetchError;

/// Which of the two stored snapshots a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotSlot {
    Previous,
    Current,
}

impl fmt::Display for SnapshotSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Previous => "previous",
            Self::Current => "current",
        })
    }
}

/// Errors that can occur while reading a metric
///
/// A counter disabled server-side is not an error; it reads as `0`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MetricError {
    /// Refreshing the snapshots failed; stale data was kept
    #[error("status refresh failed: {0}")]
    Fetch(#[from] FetchError),

    /// The server does not report this key
    #[error("status key '{key}' missing from {slot} snapshot")]
    KeyMissing { key: String, slot: SnapshotSlot },

    /// The server reported a value that is neither a number nor "OFF"
    #[error("cannot convert {slot} value of '{key}' to a number: {raw:?}")]
    UnitConversion {
        key: String,
        slot: SnapshotSlot,
        raw: String,
    },
}

impl MetricError {
    /// Key the failed read was for, if the error is key-specific
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Fetch(_) => None,
            Self::KeyMissing { key, .. } | Self::UnitConversion { key, .. } => Some(key),
        }
    }

    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// Get the appropriate log level for this error
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        match self {
            Self::Fetch(e) => e.log_level(),
            // Catalog references a key this searchd version does not report
            Self::KeyMissing { .. } => tracing::Level::DEBUG,
            Self::UnitConversion { .. } => tracing::Level::WARN,
        }
    }
}
