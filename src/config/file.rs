//! Settings file parsing
//!
//! The settings file is a list of `key=value` lines. Lines starting with `#` are
//! comments and empty lines are skipped. Keys and values are taken exactly as
//! written, without trimming. Only `path`, `cmd` and `jpn` are accepted; any other
//! key rejects the whole file.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Directory under the plugin/config directory that holds the settings file
pub const SETTINGS_DIR: &str = "Ts3TTS";

/// Settings file name
pub const SETTINGS_FILE: &str = "settings.ini";

/// Recognized settings keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Path to the speech executable
    Path,
    /// Command fragment placed before the text argument
    Cmd,
    /// Keep only Japanese script when `true`
    Jpn,
}

impl SettingKey {
    /// Parse a key as written in the settings file
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "path" => Some(Self::Path),
            "cmd" => Some(Self::Cmd),
            "jpn" => Some(Self::Jpn),
            _ => None,
        }
    }

    /// Key as written in the settings file
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Cmd => "cmd",
            Self::Jpn => "jpn",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated key/value pairs read from a settings file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    values: HashMap<SettingKey, String>,
}

impl SettingsFile {
    /// Parse settings file contents
    ///
    /// Later lines override earlier ones. A recognized key without a value is
    /// accepted and left unset.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` on the first unrecognized key
    pub fn parse(content: &str) -> Result<Self> {
        let mut values = HashMap::new();

        for (index, line) in content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                tracing::debug!(line = index + 1, "settings comment");
                continue;
            }

            let (key, value) = match line.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (line, None),
            };

            let Some(setting) = SettingKey::parse(key) else {
                return Err(Error::Config(format!(
                    "unrecognized setting `{key}` on line {}",
                    index + 1
                )));
            };

            match value {
                Some(value) if !value.is_empty() => {
                    tracing::debug!(key = %setting, value, "setting");
                    values.insert(setting, value.to_string());
                }
                _ => tracing::debug!(key = %setting, "setting without value"),
            }
        }

        Ok(Self { values })
    }

    /// Read and parse a settings file
    ///
    /// A missing file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but can't be read, or contains an
    /// unrecognized key
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "settings file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Value for `key`, if set
    #[must_use]
    pub fn get(&self, key: SettingKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }
}

/// Settings file inside a plugin directory: `<dir>/Ts3TTS/settings.ini`
#[must_use]
pub fn settings_path_in(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_DIR).join(SETTINGS_FILE)
}

/// Default settings file path in the user config directory
pub fn default_settings_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| settings_path_in(d.config_dir()))
}
