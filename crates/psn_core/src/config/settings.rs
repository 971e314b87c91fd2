//! Settings struct with TOML-based sections.
//!
//! Each section maps to a TOML table and can be updated independently.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::logging::{LogConfig, LogLevel};
use crate::models::{
    PropertyType, RunConfigBuilder, DEFAULT_BLOCK_SIZE, DEFAULT_STRIDE, DEFAULT_THRESHOLD,
};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// External checker settings.
    #[serde(default)]
    pub checker: CheckerSettings,

    /// Defaults for new runs.
    #[serde(default)]
    pub run: RunSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Result, plot and work directories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Root folder for run artifacts. Each interconnect size gets a subfolder.
    #[serde(default = "default_results_folder")]
    pub results_folder: String,

    /// Folder for rendered charts.
    #[serde(default = "default_plots_folder")]
    pub plots_folder: String,

    /// Folder for model handoff files.
    #[serde(default = "default_work_folder")]
    pub work_folder: String,
}

fn default_results_folder() -> String {
    "results".to_string()
}

fn default_plots_folder() -> String {
    "plot".to_string()
}

fn default_work_folder() -> String {
    ".work".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            results_folder: default_results_folder(),
            plots_folder: default_plots_folder(),
            work_folder: default_work_folder(),
        }
    }
}

impl PathSettings {
    /// Result folder for a `size x size` interconnect.
    pub fn results_for_size(&self, size: u32) -> PathBuf {
        PathBuf::from(&self.results_folder).join(format!("{}x{}", size, size))
    }
}

/// External checker settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerSettings {
    /// Executable name or path.
    #[serde(default = "default_executable")]
    pub executable: String,
}

fn default_executable() -> String {
    "modest".to_string()
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            executable: default_executable(),
        }
    }
}

/// Defaults applied to every run unless overridden on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Sampled cycles per window.
    #[serde(default = "default_block_size")]
    pub block_size: u64,

    /// Sampling stride.
    #[serde(default = "default_stride")]
    pub stride: u64,

    /// Noise threshold.
    #[serde(default = "default_threshold")]
    pub threshold: u32,

    /// Consecutive skipped windows tolerated in an unbounded simulation.
    /// Zero disables the limit.
    #[serde(default = "default_failure_limit")]
    pub failure_limit: u32,
}

fn default_block_size() -> u64 {
    DEFAULT_BLOCK_SIZE
}

fn default_stride() -> u64 {
    DEFAULT_STRIDE
}

fn default_threshold() -> u32 {
    DEFAULT_THRESHOLD
}

fn default_failure_limit() -> u32 {
    crate::driver::DEFAULT_FAILURE_LIMIT
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            stride: default_stride(),
            threshold: default_threshold(),
            failure_limit: default_failure_limit(),
        }
    }
}

impl RunSettings {
    /// Run config builder seeded with these defaults.
    pub fn builder(&self, size: u32, property: PropertyType) -> RunConfigBuilder {
        RunConfigBuilder::new(size, property)
            .block_size(self.block_size)
            .stride(self.stride)
            .threshold(self.threshold)
    }

    /// Failure limit as a driver option.
    pub fn failure_limit(&self) -> Option<u32> {
        (self.failure_limit > 0).then_some(self.failure_limit)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level echoed to the console.
    #[serde(default)]
    pub level: LogLevel,

    /// Prefix echoed lines with a wall-clock timestamp.
    #[serde(default)]
    pub show_timestamps: bool,

    /// Echo run progress to the console.
    #[serde(default = "default_true")]
    pub echo: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            show_timestamps: false,
            echo: true,
        }
    }
}

impl LoggingSettings {
    /// Run log configuration from these settings.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            level: self.level,
            show_timestamps: self.show_timestamps,
        }
    }
}

/// Names of config sections for targeted updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSection {
    Paths,
    Checker,
    Run,
    Logging,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Paths,
        ConfigSection::Checker,
        ConfigSection::Run,
        ConfigSection::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Checker => "checker",
            ConfigSection::Run => "run",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "Result, plot and work directories",
            ConfigSection::Checker => "External model checker",
            ConfigSection::Run => "Run defaults (overridable on the command line)",
            ConfigSection::Logging => "Console logging",
        }
    }
}
