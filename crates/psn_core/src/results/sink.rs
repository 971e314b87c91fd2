//! Result sink writing the CSV timeline and the run log.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::csv::write_timeline_csv;
use super::naming::ArtifactNames;
use crate::models::{RunConfig, Timeline};

/// Errors that can occur while persisting or re-reading results.
#[derive(Error, Debug)]
pub enum SinkError {
    /// File I/O failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A timeline CSV could not be parsed.
    #[error("Malformed timeline CSV at line {line}: {message}")]
    MalformedCsv { line: usize, message: String },
}

impl SinkError {
    /// Create an I/O error with the offending path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a malformed CSV error.
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedCsv {
            line,
            message: message.into(),
        }
    }
}

/// Result type for sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Paths of the artifacts written for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPaths {
    /// Timeline CSV.
    pub csv: PathBuf,
    /// Run log with timing.
    pub run_log: PathBuf,
}

/// Persists run results into one directory.
#[derive(Debug, Clone)]
pub struct ResultSink {
    result_dir: PathBuf,
}

impl ResultSink {
    /// Create a sink writing into `result_dir`.
    pub fn new(result_dir: impl Into<PathBuf>) -> Self {
        Self {
            result_dir: result_dir.into(),
        }
    }

    /// Directory results are written to.
    pub fn result_dir(&self) -> &Path {
        &self.result_dir
    }

    /// Paths this sink would use for `config`.
    pub fn paths_for(&self, config: &RunConfig) -> ArtifactPaths {
        let names = ArtifactNames::for_config(config);
        ArtifactPaths {
            csv: names.csv_path(&self.result_dir),
            run_log: names.log_path(&self.result_dir),
        }
    }

    /// Write the run log and the timeline CSV.
    ///
    /// Each file is written to a temp sibling and renamed into place, so a
    /// reader never sees a partial artifact. Existing files are replaced.
    pub fn persist(
        &self,
        config: &RunConfig,
        timeline: &Timeline,
        run_log: &str,
    ) -> SinkResult<ArtifactPaths> {
        fs::create_dir_all(&self.result_dir).map_err(|e| SinkError::io(&self.result_dir, e))?;

        let paths = self.paths_for(config);

        atomic_write(&paths.run_log, run_log.as_bytes())
            .map_err(|e| SinkError::io(&paths.run_log, e))?;

        let mut csv = Vec::new();
        write_timeline_csv(&mut csv, timeline).map_err(|e| SinkError::io(&paths.csv, e))?;
        atomic_write(&paths.csv, &csv).map_err(|e| SinkError::io(&paths.csv, e))?;

        tracing::info!(
            "Wrote {} samples to {}",
            timeline.len(),
            paths.csv.display()
        );

        Ok(paths)
    }
}

/// Write content to a file atomically (temp file, then rename).
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path)
}
