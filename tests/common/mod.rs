//! Shared test utilities

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::TempDir;
use ts3tts::{CommandLine, Launcher};

/// Launcher that records launches instead of spawning processes
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    launches: Mutex<Vec<(PathBuf, Vec<u16>)>>,
}

impl RecordingLauncher {
    /// Recorded `(program, command line)` pairs, command lines as strings
    pub fn launches(&self) -> Vec<(PathBuf, String)> {
        self.launches
            .lock()
            .expect("launch log poisoned")
            .iter()
            .map(|(program, line)| (program.clone(), String::from_utf16_lossy(line)))
            .collect()
    }

    /// Recorded command lines as raw code units
    pub fn wide_command_lines(&self) -> Vec<Vec<u16>> {
        self.launches
            .lock()
            .expect("launch log poisoned")
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Number of launches so far
    pub fn count(&self) -> usize {
        self.launches.lock().expect("launch log poisoned").len()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, program: &Path, command_line: &CommandLine) {
        self.launches
            .lock()
            .expect("launch log poisoned")
            .push((program.to_path_buf(), command_line.as_wide().to_vec()));
    }
}

/// Create a plugin directory with `Ts3TTS/settings.ini` holding `content`
pub fn plugin_dir_with_settings(content: &str) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    let settings = ts3tts::Plugin::settings_path(dir.path());
    std::fs::create_dir_all(settings.parent().expect("settings path has parent"))
        .expect("failed to create settings dir");
    std::fs::write(&settings, content).expect("failed to write settings");
    dir
}

/// Encode a string as UTF-16 code units
pub fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}
