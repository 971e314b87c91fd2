//! Deterministic artifact names.

use std::path::{Path, PathBuf};

use crate::models::RunConfig;

/// Filenames derived from `(size, property, threshold, stride, effective block size)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    stem: String,
}

impl ArtifactNames {
    /// Derive the names for a run configuration.
    pub fn for_config(config: &RunConfig) -> Self {
        let stem = format!(
            "noc_{size}x{size}_{property}_noise_threshold_{threshold}_stride_{stride}_block_size_{block}",
            size = config.size(),
            property = config.property().file_token(),
            threshold = config.threshold(),
            stride = config.stride(),
            block = config.effective_block_size(),
        );
        Self { stem }
    }

    /// Shared filename stem.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Timeline CSV filename.
    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.stem)
    }

    /// Run log filename.
    pub fn log_file_name(&self) -> String {
        format!("{}.time.txt", self.stem)
    }

    /// Timeline CSV path inside `dir`.
    pub fn csv_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.csv_file_name())
    }

    /// Run log path inside `dir`.
    pub fn log_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.log_file_name())
    }
}
