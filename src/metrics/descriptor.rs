//! Metric descriptors
//!
//! A descriptor binds a display name and unit label to one status key and
//! decides how that key is read from the shared data source.

use std::fmt;
use std::sync::Arc;

use crate::status::{MetricError, RateDataSource};

/// How a metric turns status values into a reported number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadMode {
    /// Report the current value as-is
    ///
    /// For figures searchd already reports as averages or rates.
    Instant,
    /// Report the change since the previous snapshot
    ///
    /// For lifetime counters such as queries served or connections opened.
    Delta,
}

impl ReadMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Instant => "instant",
            Self::Delta => "delta",
        }
    }
}

impl fmt::Display for ReadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, unit-labelled metric backed by one status key
///
/// `name` may carry a category prefix such as `general/Queries`; it is
/// treated as an opaque display string.
#[derive(Clone)]
pub struct Metric {
    name: String,
    units: String,
    data_key: String,
    mode: ReadMode,
    source: Arc<RateDataSource>,
}

impl Metric {
    pub fn new(
        name: impl Into<String>,
        units: impl Into<String>,
        data_key: impl Into<String>,
        mode: ReadMode,
        source: Arc<RateDataSource>,
    ) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            data_key: data_key.into(),
            mode,
            source,
        }
    }

    /// Metric reporting the current value of `data_key`
    pub fn instant(
        name: impl Into<String>,
        units: impl Into<String>,
        data_key: impl Into<String>,
        source: Arc<RateDataSource>,
    ) -> Self {
        Self::new(name, units, data_key, ReadMode::Instant, source)
    }

    /// Metric reporting the change of `data_key` since the previous snapshot
    pub fn delta(
        name: impl Into<String>,
        units: impl Into<String>,
        data_key: impl Into<String>,
        source: Arc<RateDataSource>,
    ) -> Self {
        Self::new(name, units, data_key, ReadMode::Delta, source)
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    #[inline]
    pub fn units(&self) -> &str {
        &self.units
    }

    #[must_use]
    #[inline]
    pub fn data_key(&self) -> &str {
        &self.data_key
    }

    #[must_use]
    #[inline]
    pub fn mode(&self) -> ReadMode {
        self.mode
    }

    /// Current value of this metric
    ///
    /// May trigger a status refresh on the shared data source.
    pub async fn value(&self) -> Result<f64, MetricError> {
        match self.mode {
            ReadMode::Instant => self.source.last(&self.data_key).await,
            ReadMode::Delta => self.source.delta(&self.data_key).await,
        }
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metric")
            .field("name", &self.name)
            .field("units", &self.units)
            .field("data_key", &self.data_key)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
