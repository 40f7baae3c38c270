//! Configuration management for Ts3TTS

pub mod file;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::Result;
use file::{SettingKey, SettingsFile};

/// Ts3TTS configuration
///
/// Built once at startup and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Path to the speech executable
    pub path: PathBuf,

    /// Command fragment placed before the `-t "<text>"` argument
    pub cmd: String,

    /// Speak only the Japanese script in a message
    pub filter_enabled: bool,
}

impl Config {
    /// Create a configuration from its parts
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, cmd: impl Into<String>, filter_enabled: bool) -> Self {
        Self {
            path: path.into(),
            cmd: cmd.into(),
            filter_enabled,
        }
    }

    /// Build a configuration from parsed settings
    ///
    /// Unset `path` and `cmd` are empty; `jpn` is enabled only by the exact value `true`.
    #[must_use]
    pub fn from_settings(settings: &SettingsFile) -> Self {
        Self {
            path: settings
                .get(SettingKey::Path)
                .map(PathBuf::from)
                .unwrap_or_default(),
            cmd: settings
                .get(SettingKey::Cmd)
                .map(ToString::to_string)
                .unwrap_or_default(),
            filter_enabled: settings.get(SettingKey::Jpn) == Some("true"),
        }
    }

    /// Parse a configuration from settings file contents
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the contents have an unrecognized key
    pub fn parse(content: &str) -> Result<Self> {
        SettingsFile::parse(content).map(|settings| Self::from_settings(&settings))
    }

    /// Load configuration from a settings file
    ///
    /// A missing file loads as the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but can't be read, or has an unrecognized key
    pub fn load(path: &Path) -> Result<Self> {
        let settings = SettingsFile::load(path)?;
        let config = Self::from_settings(&settings);

        if config.path.as_os_str().is_empty() {
            tracing::warn!(settings = %path.display(), "no speech executable path configured");
        }

        tracing::info!(
            settings = %path.display(),
            program = %config.path.display(),
            filter_enabled = config.filter_enabled,
            "loaded configuration"
        );

        Ok(config)
    }
}
