//! Ts3TTS - speak incoming chat messages through an external TTS executable
//!
//! This library provides:
//! - Settings file loading into an immutable [`Config`]
//! - UTF-8 to UTF-16 decoding and Japanese script filtering
//! - Command line construction for the speech executable
//! - Fire-and-forget process launching
//! - Per-message dispatch and the host plugin lifecycle
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            Host (chat client / CLI)          │
//! └──────────────────────┬───────────────────────┘
//!                        │ TextMessageEvent
//! ┌──────────────────────▼───────────────────────┐
//! │                  Dispatcher                  │
//! │  decode  →  script filter (jpn)  →  command  │
//! └──────────────────────┬───────────────────────┘
//!                        │ path + command line
//! ┌──────────────────────▼───────────────────────┐
//! │        Launcher (detached OS process)        │
//! └──────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod plugin;
pub mod speech;
pub mod text;

pub use config::Config;
pub use dispatch::{Dispatcher, EventStatus, TextMessageEvent};
pub use error::{Error, Result};
pub use plugin::{PLUGIN_INFO, Plugin, PluginInfo};
pub use speech::{CommandLine, LaunchOutcome, Launcher, ProcessLauncher};
