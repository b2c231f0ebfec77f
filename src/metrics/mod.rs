//! Metric descriptors, the built-in catalog and reporting cycles

pub mod catalog;
mod descriptor;
pub mod reporting;

pub use catalog::{CATALOG, MetricDefinition, build_metrics};
pub use descriptor::{Metric, ReadMode};
pub use reporting::{
    CycleReport, LogSink, MetricFailure, MetricReading, MetricSink, collect_cycle,
    run_reporting_loop,
};
