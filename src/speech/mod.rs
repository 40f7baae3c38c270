//! Speech output through an external executable
//!
//! Builds the command line for the configured executable and starts it without
//! waiting for it to finish.

mod command;
mod launcher;

pub use command::{CommandLine, build_command_line};
pub use launcher::{LaunchOutcome, Launcher, ProcessLauncher};
