//! Centralized logging setup
//!
//! Both functions read the level from the `RUST_LOG` environment variable and
//! default to `info`. They install a global subscriber, so call one of them
//! once, early, from the embedding application.

use std::path::Path;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// File name used by [`init_dual_logging`]
pub const LOG_FILE_NAME: &str = "agent.log";

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
}

/// Initialize logging to stdout
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(env_filter()),
        )
        .try_init()?;
    Ok(())
}

/// Initialize logging with dual output: stdout + `agent.log` in `log_dir`
///
/// The file is written through a non-blocking appender; its guard is
/// forgotten so the writer stays alive for the program lifetime.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_dual_logging(log_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(env_filter()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(env_filter()),
        )
        .try_init()?;

    // Keep guard alive for the program lifetime
    std::mem::forget(guard);
    Ok(())
}
