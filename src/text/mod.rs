//! Message text handling
//!
//! Decodes incoming UTF-8 messages to UTF-16 code units and filters them down
//! to the scripts that should be spoken.

mod decode;
mod script;

pub use decode::decode_utf8;
pub use script::{JAPANESE_RANGES, ScriptRange, filter_script, retain_japanese};
