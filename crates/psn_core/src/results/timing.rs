//! Elapsed-time formatting.

use std::time::Duration;

/// Format a duration as `HH:MM:SS.ff`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = (total % 60) as f64 + f64::from(elapsed.subsec_nanos()) / 1e9;
    format!("{:02}:{:02}:{:05.2}", hours, minutes, seconds)
}
