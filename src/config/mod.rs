/// Manifest location resolution
pub mod location;

pub use location::LogFileLocation;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Detector settings, loadable from TOML
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DetectorConfig {
    /// Where the manifest lives
    #[serde(default)]
    pub log_file: LogFileOptions,

    /// Scan parallelism
    #[serde(default)]
    pub performance: PerformanceConfig,
}

/// Caller overrides for the manifest location.
///
/// An empty string behaves exactly like an unset value.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LogFileOptions {
    /// Base directory holding the `.log` folder (defaults to the target directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Manifest file name (defaults to `mtime.json`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Parallelism of the stat fan-out
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PerformanceConfig {
    /// Stat worker count; `0` uses the shared pool
    #[serde(default)]
    pub parallel_threads: usize,
}

impl LogFileOptions {
    /// Options with every value defaulted
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the base directory of the `.log` folder
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Override the manifest file name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl DetectorConfig {
    /// Load configuration from a TOML file
    ///
    /// A missing file yields the default configuration; nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file contains invalid TOML
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_str =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path, toml_str)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}
