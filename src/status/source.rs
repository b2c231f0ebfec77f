//! Rate-computing data source
//!
//! Holds the two most recent snapshots and serves "last value" and
//! "delta since previous snapshot" reads from them. Refresh, the snapshot
//! swap and the read all happen under one lock, so a reader never sees a
//! `previous`/`current` pair that came from different refreshes.

use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::error::{MetricError, SnapshotSlot};
use super::fetcher::{StatusFetcher, StatusTarget};
use super::snapshot::{Snapshot, StatusValue};
use crate::constants::status::{MIN_REFRESH_INTERVAL, UPTIME_KEY};
use crate::fetch_error::FetchError;

/// Snapshot pair plus refresh bookkeeping
#[derive(Debug, Default)]
struct SourceState {
    previous: Option<Arc<Snapshot>>,
    current: Option<Arc<Snapshot>>,
    last_refresh: Option<Instant>,
}

impl SourceState {
    /// True when no refresh happened yet or the last one is older than the window
    fn is_stale(&self, now: Instant) -> bool {
        self.last_refresh
            .is_none_or(|last| now.saturating_duration_since(last) > MIN_REFRESH_INTERVAL)
    }

    /// Install a freshly fetched snapshot as `current`
    ///
    /// The first snapshot ever fetched fills both slots, so every delta reads
    /// zero until a second fetch happens.
    fn install(&mut self, snapshot: Snapshot, now: Instant) {
        let snapshot = Arc::new(snapshot);
        let shifted = if self.previous.is_some() {
            self.current.take()
        } else {
            None
        };
        self.previous = Some(shifted.unwrap_or_else(|| Arc::clone(&snapshot)));
        self.current = Some(snapshot);
        self.last_refresh = Some(now);
    }

    /// Collapse the delta window if `uptime` went backwards
    fn detect_restart(&mut self, target: &StatusTarget) -> Result<(), MetricError> {
        let Some((previous, current)) = self.pair(UPTIME_KEY)? else {
            return Ok(());
        };
        if current < previous {
            info!(
                "searchd at {} restarted (uptime {} -> {}), resetting delta baseline",
                target, previous, current
            );
            self.previous = self.current.clone();
        }
        Ok(())
    }

    /// Read `key` from both snapshots
    ///
    /// Returns `None` when either side is disabled server-side.
    fn pair(&self, key: &str) -> Result<Option<(f64, f64)>, MetricError> {
        let previous = lookup(self.previous.as_deref(), key, SnapshotSlot::Previous)?;
        let current = lookup(self.current.as_deref(), key, SnapshotSlot::Current)?;

        match (previous, current) {
            (StatusValue::Disabled, _) | (_, StatusValue::Disabled) => Ok(None),
            (StatusValue::Malformed(raw), _) => {
                Err(unit_conversion(key, SnapshotSlot::Previous, raw))
            }
            (_, StatusValue::Malformed(raw)) => {
                Err(unit_conversion(key, SnapshotSlot::Current, raw))
            }
            (StatusValue::Numeric(previous), StatusValue::Numeric(current)) => {
                Ok(Some((*previous, *current)))
            }
        }
    }
}

fn lookup<'a>(
    snapshot: Option<&'a Snapshot>,
    key: &str,
    slot: SnapshotSlot,
) -> Result<&'a StatusValue, MetricError> {
    snapshot
        .and_then(|s| s.get(key))
        .ok_or_else(|| MetricError::KeyMissing {
            key: key.to_string(),
            slot,
        })
}

fn unit_conversion(key: &str, slot: SnapshotSlot, raw: &str) -> MetricError {
    MetricError::UnitConversion {
        key: key.to_string(),
        slot,
        raw: raw.to_string(),
    }
}

/// Derives per-interval values from searchd's lifetime counters
///
/// Shared behind an `Arc` by every metric bound to the same server.
pub struct RateDataSource {
    target: StatusTarget,
    fetcher: Arc<dyn StatusFetcher>,
    state: Mutex<SourceState>,
}

impl RateDataSource {
    /// Create a data source that queries `target` through `fetcher`
    ///
    /// Nothing is fetched until the first read.
    pub fn new<F>(target: StatusTarget, fetcher: F) -> Self
    where
        F: StatusFetcher + 'static,
    {
        Self::with_fetcher(target, Arc::new(fetcher))
    }

    /// Create a data source around an already shared fetcher
    pub fn with_fetcher(target: StatusTarget, fetcher: Arc<dyn StatusFetcher>) -> Self {
        Self {
            target,
            fetcher,
            state: Mutex::new(SourceState::default()),
        }
    }

    #[must_use]
    pub fn target(&self) -> &StatusTarget {
        &self.target
    }

    /// Refresh the snapshots if the refresh window has elapsed
    ///
    /// On fetch failure the stale snapshots stay in place and the error is
    /// returned. After every successful attempt, fresh or cached, `uptime`
    /// is compared across the snapshots to detect a server restart; if it
    /// cannot be read, that error is returned and no reset happens.
    pub async fn ensure_fresh(&self) -> Result<(), MetricError> {
        let mut state = self.state.lock().await;
        self.refresh(&mut state).await
    }

    /// Change of `key` between the previous and current snapshot
    ///
    /// Reads `0` when the counter is disabled in either snapshot.
    pub async fn delta(&self, key: &str) -> Result<f64, MetricError> {
        let mut state = self.state.lock().await;
        self.refresh(&mut state).await?;
        Ok(state
            .pair(key)?
            .map_or(0.0, |(previous, current)| current - previous))
    }

    /// Value of `key` in the current snapshot
    ///
    /// For figures searchd already reports as averages or rates. Applies the
    /// same presence, sentinel and conversion rules as [`delta`](Self::delta).
    pub async fn last(&self, key: &str) -> Result<f64, MetricError> {
        let mut state = self.state.lock().await;
        self.refresh(&mut state).await?;
        Ok(state.pair(key)?.map_or(0.0, |(_, current)| current))
    }

    /// The stored `(previous, current)` pair, if anything was fetched yet
    pub async fn snapshots(&self) -> Option<(Arc<Snapshot>, Arc<Snapshot>)> {
        let state = self.state.lock().await;
        Some((state.previous.clone()?, state.current.clone()?))
    }

    /// When the last successful fetch started
    pub async fn last_refresh(&self) -> Option<Instant> {
        self.state.lock().await.last_refresh
    }

    async fn refresh(&self, state: &mut SourceState) -> Result<(), MetricError> {
        let now = Instant::now();
        if state.is_stale(now) {
            let snapshot = self.fetch_snapshot().await.inspect_err(|e| {
                warn!(
                    "Status refresh from {} failed, keeping stale snapshots: {}",
                    self.target, e
                );
            })?;
            state.install(snapshot, now);
        }
        state.detect_restart(&self.target)
    }

    async fn fetch_snapshot(&self) -> Result<Snapshot, FetchError> {
        let fetch = self.fetcher.fetch(&self.target);
        let rows = match self.target.connection_timeout.as_duration() {
            Some(limit) => tokio::time::timeout(limit, fetch)
                .await
                .map_err(|_| self.target.timeout_error(limit))??,
            None => fetch.await?,
        };

        let snapshot = Snapshot::from_rows(rows);
        debug!(
            "Fetched status from {}: {} keys",
            self.target,
            snapshot.len()
        );
        Ok(snapshot)
    }
}

impl fmt::Debug for RateDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateDataSource")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::fetch_error::FetchError;
    use crate::status::StatusRow;

    /// Replays canned fetch results in order
    #[derive(Clone, Default)]
    struct Scripted {
        responses: Arc<StdMutex<VecDeque<Result<Vec<StatusRow>, String>>>>,
        calls: Arc<AtomicUsize>,
    }

    impl Scripted {
        fn push(&self, rows: &[(&str, &str)]) -> &Self {
            let rows = rows
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            self.responses.lock().unwrap().push_back(Ok(rows));
            self
        }

        fn push_failure(&self, reason: &str) -> &Self {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(reason.to_string()));
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StatusFetcher for Scripted {
        async fn fetch(&self, target: &StatusTarget) -> Result<Vec<StatusRow>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.responses.lock().unwrap().pop_front();
            match next {
                Some(Ok(rows)) => Ok(rows),
                Some(Err(reason)) => Err(FetchError::Protocol {
                    host: target.host.to_string(),
                    port: target.port.get(),
                    reason,
                }),
                None => Err(FetchError::Io(std::io::Error::other("script exhausted"))),
            }
        }
    }

    fn source(fetcher: &Scripted) -> RateDataSource {
        RateDataSource::new(StatusTarget::default(), fetcher.clone())
    }

    async fn next_window() {
        tokio::time::advance(MIN_REFRESH_INTERVAL + Duration::from_secs(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_fills_both_slots() {
        let fetcher = Scripted::default();
        fetcher.push(&[("uptime", "10"), ("queries", "7")]);
        let source = source(&fetcher);

        assert!(source.snapshots().await.is_none());
        source.ensure_fresh().await.unwrap();

        let (previous, current) = source.snapshots().await.unwrap();
        assert!(Arc::ptr_eq(&previous, &current));
        assert_eq!(source.delta("queries").await.unwrap(), 0.0);
        assert_eq!(source.last("queries").await.unwrap(), 7.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_is_throttled() {
        let fetcher = Scripted::default();
        fetcher
            .push(&[("uptime", "10"), ("queries", "1")])
            .push(&[("uptime", "50"), ("queries", "4")]);
        let source = source(&fetcher);

        source.ensure_fresh().await.unwrap();
        source.ensure_fresh().await.unwrap();
        assert_eq!(fetcher.calls(), 1);

        // Exactly on the boundary is still inside the window
        tokio::time::advance(MIN_REFRESH_INTERVAL).await;
        source.ensure_fresh().await.unwrap();
        assert_eq!(fetcher.calls(), 1);

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(source.delta("queries").await.unwrap(), 3.0);
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_fetch_keeps_stale_state() {
        let fetcher = Scripted::default();
        fetcher
            .push(&[("uptime", "10"), ("queries", "1")])
            .push(&[("uptime", "40"), ("queries", "9")])
            .push_failure("garbled")
            .push(&[("uptime", "41"), ("queries", "12")]);
        let source = source(&fetcher);

        source.ensure_fresh().await.unwrap();
        next_window().await;
        assert_eq!(source.delta("queries").await.unwrap(), 8.0);
        let refreshed_at = source.last_refresh().await;

        next_window().await;
        let err = source.delta("queries").await.unwrap_err();
        assert!(err.is_fetch_error());
        assert_eq!(source.last_refresh().await, refreshed_at);

        // Timestamp untouched, so the very next read retries
        assert_eq!(source.delta("queries").await.unwrap(), 3.0);
        assert_eq!(fetcher.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_collapses_window() {
        let fetcher = Scripted::default();
        fetcher
            .push(&[("uptime", "500"), ("queries", "900")])
            .push(&[("uptime", "510"), ("queries", "950")])
            .push(&[("uptime", "10"), ("queries", "30")]);
        let source = source(&fetcher);

        source.ensure_fresh().await.unwrap();
        next_window().await;
        assert_eq!(source.delta("queries").await.unwrap(), 50.0);

        next_window().await;
        assert_eq!(source.delta("queries").await.unwrap(), 0.0);
        let (previous, current) = source.snapshots().await.unwrap();
        assert!(Arc::ptr_eq(&previous, &current));
        assert_eq!(source.last("queries").await.unwrap(), 30.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_uptime_fails_every_read() {
        let fetcher = Scripted::default();
        fetcher.push(&[("queries", "5")]);
        let source = source(&fetcher);

        let err = source.last("queries").await.unwrap_err();
        assert!(matches!(err, MetricError::KeyMissing { ref key, .. } if key == "uptime"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_uptime_skips_restart_check() {
        let fetcher = Scripted::default();
        fetcher
            .push(&[("uptime", "OFF"), ("queries", "100")])
            .push(&[("uptime", "OFF"), ("queries", "120")]);
        let source = source(&fetcher);

        source.ensure_fresh().await.unwrap();
        next_window().await;
        assert_eq!(source.delta("queries").await.unwrap(), 20.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_value_reads_zero() {
        let fetcher = Scripted::default();
        fetcher
            .push(&[("uptime", "1"), ("dist_wall", "12.5")])
            .push(&[("uptime", "40"), ("dist_wall", "OFF")]);
        let source = source(&fetcher);

        assert_eq!(source.last("dist_wall").await.unwrap(), 12.5);
        next_window().await;
        assert_eq!(source.delta("dist_wall").await.unwrap(), 0.0);
        assert_eq!(source.last("dist_wall").await.unwrap(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_value_names_slot() {
        let fetcher = Scripted::default();
        fetcher
            .push(&[("uptime", "1"), ("queries", "n/a")])
            .push(&[("uptime", "40"), ("queries", "17")]);
        let source = source(&fetcher);

        source.ensure_fresh().await.unwrap();
        next_window().await;
        let err = source.delta("queries").await.unwrap_err();
        assert!(matches!(
            err,
            MetricError::UnitConversion {
                slot: SnapshotSlot::Previous,
                ..
            }
        ));
    }

    #[test]
    fn test_install_shifts_current_into_previous() {
        let now = Instant::now();
        let mut state = SourceState::default();
        state.install(Snapshot::from_rows([("uptime", "1")]), now);
        state.install(Snapshot::from_rows([("uptime", "2")]), now);
        state.install(Snapshot::from_rows([("uptime", "3")]), now);

        assert_eq!(state.pair("uptime").unwrap(), Some((2.0, 3.0)));
    }

    #[test]
    fn test_disabled_side_wins_over_malformed() {
        let now = Instant::now();
        let mut state = SourceState::default();
        state.install(Snapshot::from_rows([("dist_wall", "n/a")]), now);
        state.install(Snapshot::from_rows([("dist_wall", "OFF")]), now);

        assert_eq!(state.pair("dist_wall").unwrap(), None);
    }
}
