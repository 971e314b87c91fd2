//! Logging types and configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Log level for filtering echoed messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace-level debugging (very verbose).
    Trace,
    /// Debug information, including raw checker output.
    Debug,
    /// General information.
    #[default]
    Info,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
}

/// Configuration for run log echo behavior.
///
/// Only the live echo is affected. The persisted buffer always receives
/// every record, without timestamps.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level echoed to the callback.
    pub level: LogLevel,
    /// Prefix echoed lines with a wall-clock timestamp.
    pub show_timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            show_timestamps: false,
        }
    }
}

/// Callback receiving each echoed line.
pub type EchoCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Message prefix types for consistent formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePrefix {
    /// Per-window progress: `  [info]: `
    Info,
    /// Skipped window: `  [warning]: `
    Warning,
    /// Unreadable trace: `  [parse-error]: `
    ParseError,
    /// Run-level status: `[status]: `
    Status,
}

impl MessagePrefix {
    /// Format a message with this prefix.
    pub fn format(&self, message: &str) -> String {
        match self {
            MessagePrefix::Info => format!("  [info]: {}", message),
            MessagePrefix::Warning => format!("  [warning]: {}", message),
            MessagePrefix::ParseError => format!("  [parse-error]: {}", message),
            MessagePrefix::Status => format!("[status]: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_format() {
        assert_eq!(MessagePrefix::Info.format("x"), "  [info]: x");
        assert_eq!(MessagePrefix::ParseError.format("x"), "  [parse-error]: x");
        assert_eq!(MessagePrefix::Status.format("x"), "[status]: x");
    }

    #[test]
    fn levels_are_ordered() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn > LogLevel::Info);
    }
}
