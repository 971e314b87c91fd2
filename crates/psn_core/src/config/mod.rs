//! Configuration management for the verification driver.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Validation on load with automatic defaults
//! - Creation of the result, plot and work folders
//!
//! # Example
//!
//! ```no_run
//! use psn_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new(".config/psn.toml");
//! config.load_or_create().unwrap();
//! config.ensure_dirs_exist().unwrap();
//!
//! println!("Results folder: {}", config.settings().paths.results_folder);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    CheckerSettings, ConfigSection, LoggingSettings, PathSettings, RunSettings, Settings,
};
