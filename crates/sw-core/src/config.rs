use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application configuration, serializable as TOML.
///
/// Every field has a sane default; a missing config file is not an error.
///
/// # Example
/// ```
/// use sw_core::AppConfig;
/// let config = AppConfig::default();
/// assert_eq!(config.sounds_dir.to_str(), Some("sounds"));
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the source clips.
    pub sounds_dir: PathBuf,
    /// Path of the metadata table (CSV).
    pub metadata_path: PathBuf,
    /// Directory where finished mixes are written.
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sounds_dir: PathBuf::from("sounds"),
            metadata_path: PathBuf::from("metadata.csv"),
            output_dir: PathBuf::from("sounds"),
        }
    }
}

impl AppConfig {
    /// Load a config from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file: {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Load a config, falling back to defaults when the file does not exist.
    ///
    /// # Errors
    /// Returns an error only when a file exists but cannot be parsed.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
