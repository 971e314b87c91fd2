//! Config manager for loading, saving, and atomic updates.
//!
//! Key features:
//! - Atomic writes (write to temp file, then rename)
//! - Validation on load (drops unknown sections)
//! - Preserves comments and formatting with toml_edit when cleaning

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::DocumentMut;

use super::settings::{ConfigSection, Settings};

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to parse config for editing: {0}")]
    EditParseError(#[from] toml_edit::TomlError),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages driver configuration.
pub struct ConfigManager {
    /// Path to the config file.
    config_path: PathBuf,
    /// Current settings loaded in memory.
    settings: Settings,
}

impl ConfigManager {
    /// Create a new config manager with the given config file path.
    ///
    /// Does not load the config - call `load()` or `load_or_create()` after.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Load config from file.
    ///
    /// Returns error if file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        self.settings = toml::from_str(&content)?;
        Ok(())
    }

    /// Load config from file, creating with defaults if it doesn't exist.
    ///
    /// Unknown sections are dropped and the file is rewritten.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            let (settings, cleaned) = Self::parse_and_clean(&content)?;
            self.settings = settings;

            if let Some(doc) = cleaned {
                tracing::info!(
                    "Removed unknown sections from {}",
                    self.config_path.display()
                );
                self.atomic_write(&doc.to_string())?;
            }
        } else {
            tracing::info!("Creating default config at {}", self.config_path.display());
            self.settings = Settings::default();
            self.save()?;
        }
        Ok(())
    }

    /// Ensure the results, plots and work directories exist.
    pub fn ensure_dirs_exist(&self) -> ConfigResult<()> {
        let paths = &self.settings.paths;
        for dir in [
            &paths.results_folder,
            &paths.plots_folder,
            &paths.work_folder,
        ] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Parse settings and strip unknown top-level tables.
    ///
    /// Returns the cleaned document only when something was removed.
    fn parse_and_clean(content: &str) -> ConfigResult<(Settings, Option<DocumentMut>)> {
        let mut doc: DocumentMut = content.parse()?;
        let settings: Settings = toml::from_str(content)?;

        let unknown: Vec<String> = doc
            .iter()
            .map(|(key, _)| key.to_string())
            .filter(|key| !ConfigSection::ALL.iter().any(|s| s.table_name() == key.as_str()))
            .collect();

        if unknown.is_empty() {
            return Ok((settings, None));
        }

        for key in &unknown {
            tracing::warn!("Ignoring unknown config section '{}'", key);
            doc.remove(key);
        }
        Ok((settings, Some(doc)))
    }

    /// Save the entire config atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        self.atomic_write(&content)?;
        Ok(())
    }

    fn section_toml(&self, section: ConfigSection) -> ConfigResult<String> {
        let text = match section {
            ConfigSection::Paths => toml::to_string_pretty(&self.settings.paths)?,
            ConfigSection::Checker => toml::to_string_pretty(&self.settings.checker)?,
            ConfigSection::Run => toml::to_string_pretty(&self.settings.run)?,
            ConfigSection::Logging => toml::to_string_pretty(&self.settings.logging)?,
        };
        Ok(text)
    }

    /// Generate config content with a comment above each section.
    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();

        output.push_str("# PSN verification driver configuration\n");
        output.push_str(
            "# This file is auto-generated. Comments are kept when unknown sections are removed.\n",
        );

        for section in ConfigSection::ALL {
            output.push('\n');
            output.push_str(&format!("# {}\n", section.description()));
            output.push_str(&format!("[{}]\n", section.table_name()));
            for line in self.section_toml(section)?.lines() {
                output.push_str(line);
                output.push('\n');
            }
        }

        Ok(output)
    }

    /// Write content to config file atomically.
    fn atomic_write(&self, content: &str) -> io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.config_path.with_extension("toml.tmp");

        {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.config_path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use tempfile::tempdir;

    #[test]
    fn load_or_create_creates_default() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(".config").join("psn.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert!(config_path.exists());
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("# External model checker\n[checker]\n"));
        assert!(content.contains("[run]"));

        let parsed: Settings = toml::from_str(&content).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn load_or_create_preserves_existing() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("psn.toml");
        fs::write(&config_path, "[checker]\nexecutable = \"/opt/modest/modest\"\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert_eq!(manager.settings().checker.executable, "/opt/modest/modest");
        assert_eq!(manager.settings().run.block_size, 50);
    }

    #[test]
    fn unknown_sections_are_removed() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("psn.toml");
        fs::write(
            &config_path,
            "# keep me\n[run]\nstride = 2\n\n[legacy]\nfoo = 1\n",
        )
        .unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(!content.contains("[legacy]"));
        assert!(content.contains("# keep me"));
        assert!(content.contains("stride = 2"));
        assert_eq!(manager.settings().run.stride, 2);
    }

    #[test]
    fn load_requires_existing_file() {
        let dir = tempdir().unwrap();
        let mut manager = ConfigManager::new(dir.path().join("missing.toml"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn load_reads_saved_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("psn.toml");
        fs::write(&config_path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load().unwrap();
        assert_eq!(manager.settings().logging.level, LogLevel::Debug);
        assert_eq!(manager.settings().checker.executable, "modest");
    }

    #[test]
    fn ensure_dirs_exist_creates_configured_folders() {
        let dir = tempdir().unwrap();
        let root = dir.path().display().to_string().replace('\\', "/");
        let config_path = dir.path().join("psn.toml");
        fs::write(
            &config_path,
            format!(
                "[paths]\nresults_folder = \"{root}/out/results\"\nplots_folder = \"{root}/out/plot\"\nwork_folder = \"{root}/out/.work\"\n"
            ),
        )
        .unwrap();

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();
        manager.ensure_dirs_exist().unwrap();

        assert!(dir.path().join("out/results").is_dir());
        assert!(dir.path().join("out/plot").is_dir());
        assert!(dir.path().join("out/.work").is_dir());
    }

    #[test]
    fn atomic_write_creates_no_temp_on_success() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("psn.toml");

        let mut manager = ConfigManager::new(&config_path);
        manager.load_or_create().unwrap();

        assert!(!config_path.with_extension("toml.tmp").exists());
    }
}
