//! Error types for Ts3TTS

use thiserror::Error;

/// Result type alias for Ts3TTS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Ts3TTS
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
