//! Validated configuration types
//!
//! Newtypes that enforce their invariants at construction time, so the
//! data source never has to re-check a host, port or timeout.

pub mod config;
pub mod validated;

pub use config::{ConnectionTimeout, Port, duration_serde};
pub use validated::{HostName, ValidationError};
