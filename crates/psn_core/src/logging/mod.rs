//! Logging infrastructure for verification runs.
//!
//! This module provides:
//! - The per-run [`RunLog`], an append-only record persisted next to the CSV
//! - Live echo of run progress through an optional callback
//! - Integration with the `tracing` ecosystem
//!
//! # Example
//!
//! ```
//! use psn_core::logging::{LogConfig, RunLog};
//!
//! let mut log = RunLog::new(LogConfig::default(), None);
//! log.header("Simulation parameters:\n  Size: 2x2\n");
//! log.info("finished clock cycle block (0,49). P: [0.001...0.250]. Pmax: 0.250");
//! assert!(log.contents().contains("Size: 2x2"));
//! ```

mod run_log;
mod types;

pub use run_log::{format_progress, RunLog};
pub use types::{EchoCallback, LogConfig, LogLevel, MessagePrefix};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize global tracing subscriber for application-wide logging.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr with timestamps
///
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .with(filter)
        .init();
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}
