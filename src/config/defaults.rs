//! Default values for configuration fields
//!
//! This module centralizes all default value functions used in serde deserialization.

use crate::constants;
use crate::types::{ConnectionTimeout, HostName, Port};
use std::time::Duration;

/// Default searchd host (loopback)
#[inline]
pub fn host() -> HostName {
    HostName::default()
}

/// Default searchd API port (9312)
#[inline]
pub fn port() -> Port {
    Port::SPHINX_API
}

/// Default status query timeout (10 seconds, never unbounded)
#[inline]
pub fn connection_timeout() -> ConnectionTimeout {
    ConnectionTimeout::DEFAULT
}

/// Default interval between reporting cycles (60 seconds)
#[inline]
pub fn report_interval() -> Duration {
    constants::reporting::DEFAULT_INTERVAL
}
