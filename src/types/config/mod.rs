//! Configuration value types
//!
//! Port, timeout and duration types used by `Config`. Each one parses
//! from the plain integers found in TOML and environment variables.

pub mod duration;
mod network;
mod timeout;

pub use duration::duration_serde;
pub use network::Port;
pub use timeout::ConnectionTimeout;
