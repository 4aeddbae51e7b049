//! Configuration management for the keylog decoder
//!
//! Provides persistent configuration loaded from a platform-specific config
//! file. Command line flags take precedence over anything set here.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/keylog-decoder/config.toml` |
//! | macOS | `~/Library/Application Support/keylog-decoder/config.toml` |
//! | Windows | `%APPDATA%\keylog-decoder\config.toml` |
//!
//! ## Example
//!
//! ```no_run
//! use keylog_decoder::Config;
//! use keylog_decoder::config::OutputFormat;
//!
//! let mut config = Config::load().unwrap_or_default();
//! config.output.format = OutputFormat::Json;
//! config.save().expect("Failed to save config");
//! ```

use crate::keyboard::{LayoutError, LayoutTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error reading or writing config file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Returns the path to the config file.
///
/// Unlike saving, looking up the path never creates the directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_dir.join("keylog-decoder").join("config.toml"))
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Layout table selection
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Layout table configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LayoutConfig {
    /// TOML layout file to use instead of the built-in table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl LayoutConfig {
    /// Load the configured table.
    ///
    /// Falls back to the built-in table when no file is configured or the
    /// configured file doesn't exist. A file that exists but is invalid is
    /// an error.
    pub fn load_table(&self) -> Result<LayoutTable, LayoutError> {
        match &self.file {
            Some(path) if path.exists() => LayoutTable::load_from(path),
            Some(path) => {
                log::warn!(
                    "layout file {} not found, using built-in layout",
                    path.display()
                );
                Ok(LayoutTable::builtin())
            }
            None => Ok(LayoutTable::builtin()),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// How decoded entries are printed
    pub format: OutputFormat,
    /// Omit entries whose decoded text is empty
    pub skip_empty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            skip_empty: false,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `[HH:MM:SS] text` line per entry
    Text,
    /// A single JSON report
    Json,
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
