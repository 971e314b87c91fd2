//! Checker discovery on the search path.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::types::{CheckerError, CheckerResult};

/// Locates the checker executable and reports its version.
pub struct ToolValidator;

impl ToolValidator {
    /// Resolve `tool` on PATH. Paths containing a separator are checked directly.
    pub fn locate(tool: &str) -> CheckerResult<PathBuf> {
        which::which(tool).map_err(|e| {
            tracing::debug!("Lookup of '{}' failed: {}", tool, e);
            CheckerError::tool_not_found(tool)
        })
    }

    /// First line of `<path> --version`.
    pub fn version(path: &Path) -> CheckerResult<String> {
        let tool = path.display().to_string();
        let output = Command::new(path)
            .arg("--version")
            .output()
            .map_err(|e| CheckerError::SpawnFailed {
                tool: tool.clone(),
                source: e,
            })?;

        let combined = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout).trim(),
            String::from_utf8_lossy(&output.stderr).trim()
        );

        Ok(combined.lines().next().unwrap_or_default().to_string())
    }

    /// Locate `tool` and read its version in one step.
    pub fn discover(tool: &str) -> CheckerResult<(PathBuf, String)> {
        let path = Self::locate(tool)?;
        let version = Self::version(&path)?;
        tracing::info!("Found {}: {}", tool, version);
        Ok((path, version))
    }
}
