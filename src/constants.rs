//! Constants used throughout the status agent
//!
//! This module centralizes magic numbers and well-known status keys
//! so the data source, config defaults and catalog agree on them.

use std::time::Duration;

/// Status query constants
pub mod status {
    use super::Duration;

    /// Minimum pause between two status queries against the same server
    ///
    /// Reads inside this window are served from the cached snapshots, which
    /// bounds the load on searchd no matter how often metrics are read.
    pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

    /// Key searchd uses for its process uptime in seconds
    ///
    /// A decrease between two snapshots means the server restarted.
    pub const UPTIME_KEY: &str = "uptime";

    /// Value searchd reports for counters it does not collect
    pub const DISABLED_SENTINEL: &str = "OFF";
}

/// Search server connection defaults
pub mod server {
    use super::Duration;

    /// Default searchd host
    pub const DEFAULT_HOST: &str = "127.0.0.1";

    /// Default searchd API port
    pub const DEFAULT_PORT: u16 = 9312;

    /// Default bound on a single status query (10 seconds)
    ///
    /// An unbounded query has to be requested explicitly with a timeout of 0.
    pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Reporting cadence
pub mod reporting {
    use super::Duration;

    /// Default interval between two reporting cycles (60 seconds)
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

    /// Component name attached to every published cycle
    pub const COMPONENT_NAME: &str = "Sphinx";
}

/// Environment variables that override file configuration
pub mod env {
    pub const HOST: &str = "SPHINX_HOST";
    pub const PORT: &str = "SPHINX_PORT";
    pub const CONNECTION_TIMEOUT: &str = "SPHINX_CONNECTION_TIMEOUT";
    pub const REPORT_INTERVAL: &str = "SPHINX_REPORT_INTERVAL";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_interval_is_thirty_seconds() {
        assert_eq!(status::MIN_REFRESH_INTERVAL, Duration::from_secs(30));
    }

    #[test]
    fn test_reporting_interval_longer_than_refresh_window() {
        // Every reporting cycle should see a fresh snapshot by default
        assert!(reporting::DEFAULT_INTERVAL > status::MIN_REFRESH_INTERVAL);
    }

    #[test]
    fn test_default_timeout_is_bounded() {
        assert!(!server::DEFAULT_CONNECTION_TIMEOUT.is_zero());
    }
}
