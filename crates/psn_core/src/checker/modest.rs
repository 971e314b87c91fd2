//! Modest toolset client.
//!
//! Models given as text are written to a handoff file in the work
//! directory. The handoff file is removed after the invocation unless the
//! output contains [`ERROR_MARKER`], in which case it is kept for debugging.
//! The marker alone does not fail a simulation that exited cleanly; the trace
//! parser decides whether such output is usable.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::client::CheckerClient;
use super::types::{CheckerError, CheckerResult, InvocationProfile, ModelSource, ERROR_MARKER};
use super::validator::ToolValidator;

/// Extension of model handoff files.
const MODEL_EXTENSION: &str = "modest";

/// Client launching the `modest` executable.
#[derive(Debug, Clone)]
pub struct ModestClient {
    /// Executable name or path.
    executable: PathBuf,
    /// Directory for model handoff files.
    work_dir: PathBuf,
}

/// Captured output of one invocation.
struct Invocation {
    output: String,
    exit_code: Option<i32>,
}

impl ModestClient {
    /// Default executable name.
    pub const DEFAULT_EXECUTABLE: &'static str = "modest";

    /// Create a client for `executable`, writing handoff files to `work_dir`.
    pub fn new(executable: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Executable this client launches.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Handoff file path for a label.
    pub fn handoff_path(&self, label: &str) -> PathBuf {
        self.work_dir
            .join(format!("{}.{}", sanitize_label(label), MODEL_EXTENSION))
    }

    /// Write the model to disk if needed, returning the path and whether it is a handoff file.
    fn materialize(&self, model: &ModelSource) -> CheckerResult<(PathBuf, bool)> {
        match model {
            ModelSource::File(path) => Ok((path.clone(), false)),
            ModelSource::Text { label, text } => {
                fs::create_dir_all(&self.work_dir)
                    .map_err(|e| CheckerError::io("creating work directory", e))?;
                let path = self.handoff_path(label);
                fs::write(&path, text)
                    .map_err(|e| CheckerError::io("writing model handoff file", e))?;
                Ok((path, true))
            }
        }
    }

    fn run(&self, profile: InvocationProfile, model: &ModelSource) -> CheckerResult<Invocation> {
        let (model_path, is_handoff) = self.materialize(model)?;

        let mut cmd = Command::new(&self.executable);
        cmd.args(profile.args(&model_path));

        tracing::debug!("Running: {:?}", cmd);

        let result = match cmd.output() {
            Ok(result) => result,
            Err(e) => {
                if is_handoff {
                    discard_handoff(&model_path);
                }
                return Err(CheckerError::SpawnFailed {
                    tool: self.tool_name().to_string(),
                    source: e,
                });
            }
        };

        let output = format!(
            "{}{}",
            String::from_utf8_lossy(&result.stdout).trim(),
            String::from_utf8_lossy(&result.stderr).trim()
        );

        if is_handoff {
            if output.contains(ERROR_MARKER) {
                tracing::debug!(
                    "Keeping model handoff file {} for inspection",
                    model_path.display()
                );
            } else {
                discard_handoff(&model_path);
            }
        }

        Ok(Invocation {
            output,
            exit_code: result.status.code(),
        })
    }
}

impl CheckerClient for ModestClient {
    fn tool_name(&self) -> &str {
        self.executable
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(Self::DEFAULT_EXECUTABLE)
    }

    fn ensure_available(&self) -> CheckerResult<()> {
        let tool = self.executable.to_string_lossy();
        ToolValidator::locate(&tool).map(|_| ())
    }

    fn check(&self, model: &ModelSource) -> CheckerResult<String> {
        let invocation = self.run(InvocationProfile::Check, model)?;
        if let Some(code) = invocation.exit_code.filter(|c| *c != 0) {
            tracing::debug!("{} check exited with code {}", self.tool_name(), code);
        }
        Ok(invocation.output)
    }

    fn simulate(&self, model: &ModelSource) -> CheckerResult<String> {
        let invocation = self.run(InvocationProfile::Simulate, model)?;

        match invocation.exit_code {
            Some(0) => Ok(invocation.output),
            _ if invocation.output.contains(ERROR_MARKER) => Err(CheckerError::ReportedError {
                tool: self.tool_name().to_string(),
                message: first_error_line(&invocation.output),
            }),
            code => Err(CheckerError::command_failed(
                self.tool_name(),
                code.unwrap_or(-1),
                last_line(&invocation.output),
            )),
        }
    }

    fn kept_model(&self, model: &ModelSource) -> Option<PathBuf> {
        match model {
            ModelSource::Text { label, .. } => {
                let path = self.handoff_path(label);
                path.exists().then_some(path)
            }
            ModelSource::File(_) => None,
        }
    }
}

fn discard_handoff(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        tracing::warn!("Failed to remove model handoff file {}: {}", path.display(), e);
    }
}

/// Sanitize a label to be safe for use as a filename.
fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '_',
            _ => c,
        })
        .collect()
}

fn first_error_line(output: &str) -> String {
    output
        .lines()
        .find(|l| l.contains(ERROR_MARKER))
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn last_line(output: &str) -> String {
    output.lines().last().unwrap_or_default().trim().to_string()
}
