//! Configuration validation
//!
//! Host, port and timeout invariants are enforced by their types. This checks
//! the remaining semantic constraints before a data source is built.

use anyhow::Result;

use super::types::Config;
use crate::constants::status::MIN_REFRESH_INTERVAL;

impl Config {
    /// Validate configuration for correctness
    ///
    /// - The reporting interval must be non-zero
    /// - Warns when cycles run faster than the status refresh window, since
    ///   such cycles re-read cached snapshots and repeat the previous deltas
    /// - Warns when the status query timeout is unbounded
    pub fn validate(&self) -> Result<()> {
        if self.reporting.interval.is_zero() {
            return Err(anyhow::anyhow!("Reporting interval must be greater than 0"));
        }

        if self.reporting.interval < MIN_REFRESH_INTERVAL {
            tracing::warn!(
                "Reporting interval {:?} is shorter than the status refresh window {:?}; \
                 consecutive cycles will repeat the same values",
                self.reporting.interval,
                MIN_REFRESH_INTERVAL
            );
        }

        if self.server.connection_timeout.is_unbounded() {
            tracing::warn!(
                "Status queries to {}:{} have no timeout; a hung searchd will stall reporting",
                self.server.host,
                self.server.port
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = Config::default();
        config.reporting.interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_short_interval_only_warns() {
        let mut config = Config::default();
        config.reporting.interval = Duration::from_secs(5);
        assert!(config.validate().is_ok());
    }
}
