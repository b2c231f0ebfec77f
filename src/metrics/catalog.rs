//! Built-in catalog of searchd metrics

use std::sync::Arc;

use super::descriptor::{Metric, ReadMode};
use crate::status::RateDataSource;

/// Static description of one reported metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDefinition {
    pub data_key: &'static str,
    pub name: &'static str,
    pub units: &'static str,
    pub mode: ReadMode,
}

impl MetricDefinition {
    const fn instant(data_key: &'static str, name: &'static str, units: &'static str) -> Self {
        Self {
            data_key,
            name,
            units,
            mode: ReadMode::Instant,
        }
    }

    const fn delta(data_key: &'static str, name: &'static str, units: &'static str) -> Self {
        Self {
            data_key,
            name,
            units,
            mode: ReadMode::Delta,
        }
    }

    /// Bind this definition to a data source
    #[must_use]
    pub fn bind(&self, source: Arc<RateDataSource>) -> Metric {
        Metric::new(self.name, self.units, self.data_key, self.mode, source)
    }
}

/// Every metric the agent reports for a searchd instance
pub const CATALOG: &[MetricDefinition] = &[
    MetricDefinition::instant("avg_query_wall", "avg/Avg Query Wall Time", "milisecond"),
    MetricDefinition::delta("queries", "general/Queries", "Queries/second"),
    MetricDefinition::delta("connections", "general/Connections", "connections/second"),
    MetricDefinition::delta(
        "maxed_out",
        "error/Maxed out connections",
        "connections/second",
    ),
    MetricDefinition::delta(
        "command_search",
        "commands/Command search",
        "command/second",
    ),
    MetricDefinition::delta(
        "command_excerpt",
        "commands/Command excerpt",
        "command/second",
    ),
    MetricDefinition::delta(
        "command_update",
        "commands/Command update",
        "command/second",
    ),
    MetricDefinition::delta(
        "command_keywords",
        "commands/Command keywords",
        "command/second",
    ),
    MetricDefinition::delta(
        "command_persist",
        "commands/Command persist",
        "command/second",
    ),
    MetricDefinition::delta(
        "command_flushattrs",
        "commands/Command flushattrs",
        "command/second",
    ),
];

/// Bind the whole catalog to one shared data source
#[must_use]
pub fn build_metrics(source: &Arc<RateDataSource>) -> Vec<Metric> {
    CATALOG
        .iter()
        .map(|definition| definition.bind(Arc::clone(source)))
        .collect()
}
