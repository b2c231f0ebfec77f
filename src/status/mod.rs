//! Status snapshots and the rate-computing data source
//!
//! searchd only exposes lifetime counters. This module keeps the two most
//! recent snapshots of those counters and derives per-interval deltas from
//! them, refreshing at most once per [`MIN_REFRESH_INTERVAL`] and collapsing
//! the delta window when the server restarts.
//!
//! [`MIN_REFRESH_INTERVAL`]: crate::constants::status::MIN_REFRESH_INTERVAL

mod error;
mod fetcher;
mod snapshot;
mod source;

pub use error::{MetricError, SnapshotSlot};
pub use fetcher::{StatusFetcher, StatusRow, StatusTarget};
pub use snapshot::{Snapshot, StatusValue};
pub use source::RateDataSource;
