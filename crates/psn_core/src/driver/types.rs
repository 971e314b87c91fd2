//! Run outcome and driver options.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::models::{RunMode, Timeline};
use crate::results::{format_elapsed, ArtifactPaths};

/// Default number of consecutive skipped windows after which an unbounded
/// simulation gives up.
pub const DEFAULT_FAILURE_LIMIT: u32 = 10;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// Every window up to the horizon was attempted.
    HorizonExhausted,
    /// The running maximum probability reached saturation.
    Saturated { clock_cycle: u64, p_max: f64 },
    /// An unbounded simulation skipped too many windows in a row.
    FailureLimit { consecutive_skips: u32 },
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::HorizonExhausted => write!(f, "clock upper bound reached"),
            StopReason::Saturated { clock_cycle, p_max } => {
                write!(f, "saturated at clock cycle {} (Pmax: {:.5})", clock_cycle, p_max)
            }
            StopReason::FailureLimit { consecutive_skips } => {
                write!(f, "gave up after {} consecutive skipped blocks", consecutive_skips)
            }
        }
    }
}

/// Tunables that are not part of the run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverOptions {
    /// Consecutive skipped windows tolerated in an unbounded simulation.
    /// `None` disables the limit. Bounded runs always reach the horizon.
    pub failure_limit: Option<u32>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            failure_limit: Some(DEFAULT_FAILURE_LIMIT),
        }
    }
}

/// Summary of one finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub mode: RunMode,
    pub stop_reason: StopReason,
    pub windows_attempted: u64,
    pub windows_skipped: u64,
    pub timeline: Timeline,
    #[serde(serialize_with = "serialize_elapsed")]
    pub elapsed: Duration,
    pub artifacts: ArtifactPaths,
}

impl RunOutcome {
    /// Number of samples collected.
    pub fn sample_count(&self) -> usize {
        self.timeline.len()
    }

    /// Pretty JSON rendering for the command line.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn serialize_elapsed<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_elapsed(*elapsed))
}
