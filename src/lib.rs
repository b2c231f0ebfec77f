//! # sphinx-status-agent
//!
//! Polls a Sphinx `searchd` status table at a bounded rate and turns its
//! lifetime counters into per-interval metrics.
//!
//! The [`RateDataSource`] keeps the two most recent status snapshots,
//! refreshes them at most once every 30 seconds, detects server restarts via
//! `uptime`, and answers "current value" and "delta since previous snapshot"
//! reads. [`Metric`] descriptors bind display names and units to status keys;
//! [`metrics::run_reporting_loop`] reads them on a fixed cadence and hands
//! each cycle to a [`MetricSink`].
//!
//! Querying searchd itself is left to a [`StatusFetcher`] implementation.
//!
//! ```no_run
//! use std::sync::Arc;
//! use sphinx_status_agent::{Config, LogSink, RateDataSource, StatusFetcher};
//! use sphinx_status_agent::metrics::{build_metrics, run_reporting_loop};
//!
//! async fn run(fetcher: impl StatusFetcher + 'static) -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let source = Arc::new(RateDataSource::new(config.target(), fetcher));
//!     let metrics = build_metrics(&source);
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::mpsc::channel(1);
//!     run_reporting_loop(&metrics, config.reporting.interval, &LogSink, shutdown_rx).await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod fetch_error;
pub mod logging;
pub mod metrics;
pub mod status;
pub mod types;

pub use config::Config;
pub use fetch_error::FetchError;
pub use metrics::{CycleReport, LogSink, Metric, MetricSink, ReadMode};
pub use status::{
    MetricError, RateDataSource, Snapshot, SnapshotSlot, StatusFetcher, StatusRow, StatusTarget,
    StatusValue,
};
