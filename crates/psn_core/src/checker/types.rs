//! Types for checker invocations.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Marker the checker prints when it rejects a model.
pub const ERROR_MARKER: &str = "error:";

/// Errors that can occur while invoking the checker.
#[derive(Error, Debug)]
pub enum CheckerError {
    /// The executable is not on the search path.
    #[error("{tool} is not on the system's PATH")]
    ToolNotFound { tool: String },

    /// The process could not be started.
    #[error("Failed to run {tool}: {source}")]
    SpawnFailed {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The process exited unsuccessfully.
    #[error("{tool} failed with exit code {exit_code}: {message}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        message: String,
    },

    /// The process failed and its output contains an error marker.
    #[error("{tool} reported an error: {message}")]
    ReportedError { tool: String, message: String },

    /// Writing the model handoff file failed.
    #[error("I/O error while {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl CheckerError {
    /// Create a tool-not-found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a command failed error.
    pub fn command_failed(tool: impl Into<String>, exit_code: i32, message: impl Into<String>) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            exit_code,
            message: message.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for checker operations.
pub type CheckerResult<T> = Result<T, CheckerError>;

/// Model handed to the checker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Model text, written to a handoff file named after `label`.
    Text { label: String, text: String },
    /// Path to an existing model file.
    File(PathBuf),
}

impl ModelSource {
    /// Model given by content.
    pub fn text(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Text {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Model given by path.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Model text, when given by content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ModelSource::Text { text, .. } => Some(text),
            ModelSource::File(_) => None,
        }
    }
}

/// Command-line profile of one invocation.
///
/// Flags and their order are fixed by the checker's command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationProfile {
    /// `check --unsafe --chainopt -D <model>`
    Check,
    /// `simulate <model> --max-run-length 0 --unsafe`
    Simulate,
}

impl InvocationProfile {
    /// Subcommand name.
    pub fn subcommand(&self) -> &'static str {
        match self {
            InvocationProfile::Check => "check",
            InvocationProfile::Simulate => "simulate",
        }
    }

    /// Full argument list for `model`.
    pub fn args(&self, model: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![self.subcommand().into()];
        match self {
            InvocationProfile::Check => {
                args.extend(["--unsafe", "--chainopt", "-D"].map(OsString::from));
                args.push(model.as_os_str().to_owned());
            }
            InvocationProfile::Simulate => {
                args.push(model.as_os_str().to_owned());
                args.extend(["--max-run-length", "0", "--unsafe"].map(OsString::from));
            }
        }
        args
    }
}
