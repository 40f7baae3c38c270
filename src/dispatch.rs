//! Text message dispatch
//!
//! Turns each incoming text message into (at most) one speech process.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};

use crate::Config;
use crate::speech::{Launcher, ProcessLauncher, build_command_line};
use crate::text::{decode_utf8, retain_japanese};

/// Incoming text message event, as delivered by the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMessageEvent {
    /// Server connection the message arrived on
    #[serde(default)]
    pub server_connection_handler_id: u64,
    /// Target mode (private, channel, server)
    #[serde(default)]
    pub target_mode: u16,
    /// Recipient client ID
    #[serde(default)]
    pub to_id: u16,
    /// Sender client ID
    #[serde(default)]
    pub from_id: u16,
    /// Sender display name
    #[serde(default)]
    pub from_name: String,
    /// Sender unique identifier
    #[serde(default)]
    pub from_unique_identifier: String,
    /// Raw UTF-8 message text
    #[serde(deserialize_with = "message_bytes")]
    pub message: Vec<u8>,
    /// Message was already ignored upstream (friend/foe list)
    #[serde(default)]
    pub ff_ignored: bool,
}

impl TextMessageEvent {
    /// Create an event carrying only message text
    #[must_use]
    pub fn from_text(message: &str) -> Self {
        Self {
            message: message.as_bytes().to_vec(),
            ..Self::default()
        }
    }

    /// Mark the event as already ignored upstream
    #[must_use]
    pub const fn ignored(mut self) -> Self {
        self.ff_ignored = true;
        self
    }
}

/// Accept the message either as a JSON string or as a byte array
fn message_bytes<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Message {
        Text(String),
        Bytes(Vec<u8>),
    }

    Ok(match Message::deserialize(deserializer)? {
        Message::Text(text) => text.into_bytes(),
        Message::Bytes(bytes) => bytes,
    })
}

/// What the host should do with the message after dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// Handle the message normally
    Continue,
}

impl EventStatus {
    /// Status code expected by the host (`0` = handle normally)
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Continue => 0,
        }
    }
}

/// Dispatches text messages to the speech executable
#[derive(Debug)]
pub struct Dispatcher<L = ProcessLauncher> {
    config: Arc<Config>,
    launcher: L,
}

impl Dispatcher {
    /// Create a dispatcher that spawns real processes
    #[must_use]
    pub const fn new(config: Arc<Config>) -> Self {
        Self::with_launcher(config, ProcessLauncher::new())
    }
}

impl<L: Launcher> Dispatcher<L> {
    /// Create a dispatcher with a custom launcher
    #[must_use]
    pub const fn with_launcher(config: Arc<Config>, launcher: L) -> Self {
        Self { config, launcher }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Launcher used for speech processes
    #[must_use]
    pub const fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Text that would be spoken for `message`, as UTF-16 code units
    ///
    /// Empty when nothing should be spoken.
    #[must_use]
    pub fn speech_text(&self, message: &[u8]) -> Vec<u16> {
        let decoded = decode_utf8(message);
        if self.config.filter_enabled {
            retain_japanese(&decoded)
        } else {
            decoded
        }
    }

    /// Handle one incoming text message
    ///
    /// Never blocks on the speech process and never suppresses the message.
    pub fn on_text_message(&self, event: &TextMessageEvent) -> EventStatus {
        if event.ff_ignored {
            tracing::trace!(from_id = event.from_id, "message ignored upstream");
            return EventStatus::Continue;
        }

        let text = self.speech_text(&event.message);
        if text.is_empty() {
            tracing::trace!(
                from_id = event.from_id,
                filter_enabled = self.config.filter_enabled,
                "nothing to speak"
            );
            return EventStatus::Continue;
        }

        tracing::debug!(
            from = %event.from_name,
            units = text.len(),
            "speaking message"
        );

        let command_line = build_command_line(&self.config.cmd, &text);
        self.launcher.launch(&self.config.path, &command_line);

        EventStatus::Continue
    }
}
