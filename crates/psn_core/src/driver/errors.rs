//! Error types for the verification driver.
//!
//! Per-window checker and parse failures never reach this level; they are
//! absorbed into the run log. Only conditions that make the whole run
//! meaningless escape [`WindowedVerificationDriver::run`](super::WindowedVerificationDriver::run).

use thiserror::Error;

use crate::checker::CheckerError;
use crate::models::Window;
use crate::render::RenderError;
use crate::results::SinkError;

/// Top-level driver error.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The checker is unavailable. Raised before any window is attempted.
    #[error("Checker precondition failed: {0}")]
    Precondition(#[source] CheckerError),

    /// Check mode has no stop signal of its own.
    #[error("Check mode requires a finite clock upper bound")]
    UnboundedCheck,

    /// The model for the first window could not be rendered.
    #[error("Failed to render model for clock cycle block {window}: {source}")]
    Render {
        window: Window,
        #[source]
        source: RenderError,
    },

    /// Writing the run artifacts failed.
    #[error("Failed to persist results: {0}")]
    Sink(#[from] SinkError),
}

impl DriverError {
    /// Create a render error for a window.
    pub fn render(window: Window, source: RenderError) -> Self {
        Self::Render { window, source }
    }

    /// Whether the error was raised before any window ran.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_) | Self::UnboundedCheck)
    }
}

/// Result type for driver runs.
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_errors_are_flagged() {
        let err = DriverError::Precondition(CheckerError::tool_not_found("modest"));
        assert!(err.is_precondition());
        assert!(err.to_string().contains("modest is not on the system's PATH"));
        assert!(DriverError::UnboundedCheck.is_precondition());
    }

    #[test]
    fn render_error_names_window() {
        let err = DriverError::render(
            Window::new(50, 99),
            RenderError::UnresolvedPlaceholder {
                placeholder: "{{X}}".to_string(),
            },
        );
        assert!(!err.is_precondition());
        assert!(err.to_string().contains("(50,99)"));
    }
}
