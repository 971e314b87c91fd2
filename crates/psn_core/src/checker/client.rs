//! Checker capability trait.

use std::path::PathBuf;

use super::types::{CheckerResult, ModelSource};

/// Capability to hand a model to an external checker.
///
/// Both calls block until the external process finishes. Timeouts are the
/// checker's business.
pub trait CheckerClient {
    /// Name of the tool, for log messages.
    fn tool_name(&self) -> &str;

    /// Verify the tool can be launched at all.
    ///
    /// Called once before a run starts. The default accepts unconditionally.
    fn ensure_available(&self) -> CheckerResult<()> {
        Ok(())
    }

    /// Run the checking profile and return its diagnostic report.
    ///
    /// A report that itself mentions an error is still returned as `Ok`.
    fn check(&self, model: &ModelSource) -> CheckerResult<String>;

    /// Run the simulation profile and return the trace.
    ///
    /// Returns `Err` when no usable trace was produced.
    fn simulate(&self, model: &ModelSource) -> CheckerResult<String>;

    /// Model file left on disk by the last invocation for `model`, if any.
    fn kept_model(&self, _model: &ModelSource) -> Option<PathBuf> {
        None
    }
}
