//! Host plugin lifecycle
//!
//! Wraps configuration loading, plugin ID registration and text message dispatch
//! behind the init/shutdown calls a chat client host makes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::file::settings_path_in;
use crate::dispatch::{Dispatcher, EventStatus, TextMessageEvent};
use crate::speech::{Launcher, ProcessLauncher};
use crate::{Config, Result};

/// Plugin API version the host must match
pub const PLUGIN_API_VERSION: i32 = 20;

/// Static plugin metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub api_version: i32,
    pub author: &'static str,
    pub description: &'static str,
}

/// Metadata reported to the host
pub const PLUGIN_INFO: PluginInfo = PluginInfo {
    name: "Ts3TTS",
    version: "1.1",
    api_version: PLUGIN_API_VERSION,
    author: "Luch",
    description: "Configuration in the plugin folder",
};

/// Init status for the host: `0` loaded, `1` failed and should be unloaded
#[must_use]
pub const fn init_status<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// A loaded plugin instance
#[derive(Debug)]
pub struct Plugin<L = ProcessLauncher> {
    dispatcher: Dispatcher<L>,
    plugin_id: Option<String>,
}

impl Plugin {
    /// Load the plugin from `<plugin_dir>/Ts3TTS/settings.ini`
    ///
    /// A missing settings file leaves every setting at its default.
    ///
    /// # Errors
    ///
    /// Returns error if the settings file can't be read or has an unrecognized key
    pub fn init(plugin_dir: &Path) -> Result<Self> {
        Self::init_with_launcher(plugin_dir, ProcessLauncher::new())
    }

    /// Settings file location for a plugin directory
    #[must_use]
    pub fn settings_path(plugin_dir: &Path) -> PathBuf {
        settings_path_in(plugin_dir)
    }
}

impl<L: Launcher> Plugin<L> {
    /// Load the plugin with a custom launcher
    ///
    /// # Errors
    ///
    /// Returns error if the settings file can't be read or has an unrecognized key
    pub fn init_with_launcher(plugin_dir: &Path, launcher: L) -> Result<Self> {
        let config = Config::load(&settings_path_in(plugin_dir))?;
        Ok(Self::from_config(config, launcher))
    }

    /// Create a plugin from an already loaded configuration
    #[must_use]
    pub fn from_config(config: Config, launcher: L) -> Self {
        tracing::info!(
            plugin = PLUGIN_INFO.name,
            version = PLUGIN_INFO.version,
            "plugin initialized"
        );
        Self {
            dispatcher: Dispatcher::with_launcher(Arc::new(config), launcher),
            plugin_id: None,
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        self.dispatcher.config()
    }

    /// Dispatcher handling text messages
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<L> {
        &self.dispatcher
    }

    /// Store the ID the host assigned to this plugin
    ///
    /// The host's buffer is only valid for the duration of the call, so it is copied.
    pub fn register_plugin_id(&mut self, id: &str) {
        tracing::debug!(plugin_id = id, "registered plugin id");
        self.plugin_id = Some(id.to_string());
    }

    /// ID assigned by the host, if registered
    #[must_use]
    pub fn plugin_id(&self) -> Option<&str> {
        self.plugin_id.as_deref()
    }

    /// Handle an incoming text message
    pub fn on_text_message(&self, event: &TextMessageEvent) -> EventStatus {
        self.dispatcher.on_text_message(event)
    }

    /// Release resources held for the host
    pub fn shutdown(&mut self) {
        if self.plugin_id.take().is_some() {
            tracing::debug!("released plugin id");
        }
        tracing::info!(plugin = PLUGIN_INFO.name, "plugin shut down");
    }
}
