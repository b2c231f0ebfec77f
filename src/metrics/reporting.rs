//! Reporting cycles
//!
//! Reads every metric once per cycle and hands the result to a sink. A
//! metric that fails to read is reported as unavailable for that cycle
//! and never aborts the others.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{Level, debug, error, info, warn};

use super::descriptor::Metric;
use crate::constants::reporting::COMPONENT_NAME;
use crate::status::MetricError;

/// A metric value read successfully this cycle
#[derive(Debug, Clone, PartialEq)]
pub struct MetricReading {
    pub name: String,
    pub units: String,
    pub value: f64,
}

/// A metric that was unavailable this cycle
#[derive(Debug)]
pub struct MetricFailure {
    pub name: String,
    pub data_key: String,
    pub error: MetricError,
}

/// Outcome of one reporting cycle
#[derive(Debug, Default)]
pub struct CycleReport {
    pub readings: Vec<MetricReading>,
    pub failures: Vec<MetricFailure>,
}

impl CycleReport {
    /// True when every metric produced a value
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Reading for the metric with this display name
    #[must_use]
    pub fn reading(&self, name: &str) -> Option<&MetricReading> {
        self.readings.iter().find(|r| r.name == name)
    }
}

/// Destination for completed cycles
#[async_trait]
pub trait MetricSink: Send + Sync {
    async fn publish(&self, report: &CycleReport) -> anyhow::Result<()>;
}

/// Sink that writes every reading to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl MetricSink for LogSink {
    async fn publish(&self, report: &CycleReport) -> anyhow::Result<()> {
        for reading in &report.readings {
            info!(
                "{} {} = {} {}",
                COMPONENT_NAME, reading.name, reading.value, reading.units
            );
        }
        if !report.is_complete() {
            info!(
                "{}: {} of {} metrics unavailable this cycle",
                COMPONENT_NAME,
                report.failures.len(),
                report.failures.len() + report.readings.len()
            );
        }
        Ok(())
    }
}

/// Read every metric once, in order
pub async fn collect_cycle(metrics: &[Metric]) -> CycleReport {
    let mut report = CycleReport::default();

    for metric in metrics {
        match metric.value().await {
            Ok(value) => report.readings.push(MetricReading {
                name: metric.name().to_string(),
                units: metric.units().to_string(),
                value,
            }),
            Err(e) => {
                log_failure(metric, &e);
                report.failures.push(MetricFailure {
                    name: metric.name().to_string(),
                    data_key: metric.data_key().to_string(),
                    error: e,
                });
            }
        }
    }

    report
}

fn log_failure(metric: &Metric, err: &MetricError) {
    match err.log_level() {
        Level::ERROR => error!("Metric '{}' unavailable: {}", metric.name(), err),
        Level::WARN => warn!("Metric '{}' unavailable: {}", metric.name(), err),
        _ => debug!("Metric '{}' unavailable: {}", metric.name(), err),
    }
}

/// Collect and publish a cycle every `interval` until shutdown
///
/// The first cycle runs immediately. Missed ticks are skipped rather than
/// bunched up. A sink error is logged and the loop carries on. Returns the
/// number of cycles run.
pub async fn run_reporting_loop(
    metrics: &[Metric],
    interval: Duration,
    sink: &dyn MetricSink,
    mut shutdown_rx: mpsc::Receiver<()>,
) -> u64 {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut cycles = 0;

    info!("Reporting {} metrics every {:?}", metrics.len(), interval);

    loop {
        tokio::select! {
            biased;

            _ = shutdown_rx.recv() => {
                info!("Shutdown initiated, stopping reporting loop");
                break;
            }

            _ = ticker.tick() => {
                let report = collect_cycle(metrics).await;
                if let Err(e) = sink.publish(&report).await {
                    warn!("Failed to publish metrics cycle: {:#}", e);
                }
                cycles += 1;
            }
        }
    }

    cycles
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::fetch_error::FetchError;
    use crate::metrics::ReadMode;
    use crate::status::{RateDataSource, StatusFetcher, StatusRow, StatusTarget};

    struct Fixed;

    #[async_trait]
    impl StatusFetcher for Fixed {
        async fn fetch(&self, _target: &StatusTarget) -> Result<Vec<StatusRow>, FetchError> {
            Ok(vec![
                ("uptime".to_string(), "100".to_string()),
                ("avg_query_wall".to_string(), "1.5".to_string()),
                ("queries".to_string(), "garbage".to_string()),
            ])
        }
    }

    fn metrics() -> Vec<Metric> {
        let source = Arc::new(RateDataSource::new(StatusTarget::default(), Fixed));
        vec![
            Metric::new(
                "avg/Wall",
                "milisecond",
                "avg_query_wall",
                ReadMode::Instant,
                source.clone(),
            ),
            Metric::new(
                "general/Queries",
                "Queries/second",
                "queries",
                ReadMode::Delta,
                source.clone(),
            ),
            Metric::new(
                "general/Connections",
                "connections/second",
                "connections",
                ReadMode::Delta,
                source,
            ),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_do_not_abort_cycle() {
        let report = collect_cycle(&metrics()).await;

        assert_eq!(report.readings.len(), 1);
        assert_eq!(report.reading("avg/Wall").map(|r| r.value), Some(1.5));
        assert_eq!(report.failures.len(), 2);
        assert!(!report.is_complete());

        let queries = &report.failures[0];
        assert_eq!(queries.data_key, "queries");
        assert!(matches!(queries.error, MetricError::UnitConversion { .. }));
        assert!(matches!(
            report.failures[1].error,
            MetricError::KeyMissing { .. }
        ));
    }

    #[tokio::test]
    async fn test_log_sink_accepts_partial_report() {
        let report = CycleReport {
            readings: vec![MetricReading {
                name: "general/Queries".to_string(),
                units: "Queries/second".to_string(),
                value: 3.0,
            }],
            failures: Vec::new(),
        };
        assert!(report.is_complete());
        LogSink.publish(&report).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_stops_when_shutdown_sender_dropped() {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
        drop(shutdown_tx);

        let cycles =
            run_reporting_loop(&metrics(), Duration::from_secs(60), &LogSink, shutdown_rx).await;
        assert_eq!(cycles, 0);
    }
}
