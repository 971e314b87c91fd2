//! Probability extraction from raw checker traces.

mod modest;

pub use modest::ModestTraceParser;

use thiserror::Error;

use crate::models::Sample;

/// Errors raised when a trace is present but unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TraceParseError {
    /// No per-cycle property results were found.
    #[error("trace contains no per-cycle probability results")]
    NoSamples,

    /// A probability value could not be read.
    #[error("line {line}: invalid probability '{value}'")]
    InvalidProbability { line: usize, value: String },

    /// A probability value is outside `[0, 1]`.
    #[error("clock cycle {clock_cycle}: probability {value} is outside [0, 1]")]
    OutOfRange { clock_cycle: u64, value: f64 },

    /// A property header had no probability line.
    #[error("property '{property}' has no probability result")]
    MissingProbability { property: String },
}

/// Result type for trace parsing.
pub type TraceParseResult<T> = Result<T, TraceParseError>;

/// Turns raw simulation output into samples ordered by clock cycle.
pub trait ProbabilityParser {
    fn parse(&self, trace: &str) -> TraceParseResult<Vec<Sample>>;
}
