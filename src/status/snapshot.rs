//! Immutable status snapshots

use std::collections::HashMap;

use crate::constants::status::DISABLED_SENTINEL;

/// A single status value as reported by searchd
///
/// Raw values are strings on the wire. They are classified once, when the
/// snapshot is built, so read paths never compare against the sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusValue {
    /// A counter or average that parsed as a number
    Numeric(f64),
    /// The server has collection for this counter switched off
    Disabled,
    /// Neither a number nor the sentinel; kept verbatim for error reporting
    Malformed(String),
}

impl StatusValue {
    /// Classify a raw status string
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == DISABLED_SENTINEL {
            return Self::Disabled;
        }
        match raw.parse::<f64>() {
            Ok(value) => Self::Numeric(value),
            Err(_) => Self::Malformed(raw.to_string()),
        }
    }

    /// Numeric value, if any
    #[must_use]
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Numeric(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    #[inline]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

/// One fetched set of status counters
///
/// Never mutated after construction. The data source shares snapshots
/// between its `previous` and `current` slots behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    values: HashMap<String, StatusValue>,
}

impl Snapshot {
    /// Build a snapshot from key/value rows
    ///
    /// When a key appears more than once the last row wins.
    pub fn from_rows<I, K, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let values = rows
            .into_iter()
            .map(|(key, raw)| (key.into(), StatusValue::parse(raw.as_ref())))
            .collect();
        Self { values }
    }

    /// Look up a key
    #[must_use]
    #[inline]
    pub fn get(&self, key: &str) -> Option<&StatusValue> {
        self.values.get(key)
    }

    #[must_use]
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of distinct keys
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all keys in arbitrary order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Snapshot
where
    K: Into<String>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_rows(iter)
    }
}
