//! Fire-and-forget launching of the speech executable
//!
//! The built command line is the child's whole command line: its first token is
//! the child's argv[0], and the executable path only selects the image to run.

use std::path::Path;
use std::sync::mpsc::Sender;

use super::CommandLine;

/// Starts the speech executable
///
/// Implementations must return without waiting for the process.
pub trait Launcher {
    /// Launch `program` with `command_line`
    fn launch(&self, program: &Path, command_line: &CommandLine);
}

/// How a watched launch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Process exited; `None` when terminated by a signal
    Exited(Option<i32>),
    /// Process could not be started
    SpawnFailed(String),
}

/// Launches the speech executable as a detached OS process
///
/// The process handle is dropped right after spawning. Spawn errors are logged and
/// otherwise ignored.
#[derive(Debug, Clone, Default)]
pub struct ProcessLauncher {
    completion: Option<Sender<LaunchOutcome>>,
}

impl ProcessLauncher {
    /// Create a launcher that never reports back
    #[must_use]
    pub const fn new() -> Self {
        Self { completion: None }
    }

    /// Create a launcher that reports each outcome on `completion`
    ///
    /// A watcher thread waits on every child so the caller still never blocks.
    #[must_use]
    pub fn with_completion(completion: Sender<LaunchOutcome>) -> Self {
        Self {
            completion: Some(completion),
        }
    }

    fn report(&self, outcome: LaunchOutcome) {
        if let Some(tx) = &self.completion {
            // Receiver may be gone; outcomes are best effort
            let _ = tx.send(outcome);
        }
    }

    fn watch(&self, child: platform::Spawned) {
        let Some(tx) = self.completion.clone() else {
            return;
        };

        let spawned = std::thread::Builder::new()
            .name("ts3tts-watch".to_string())
            .spawn(move || {
                let outcome = match child.wait() {
                    Ok(code) => LaunchOutcome::Exited(code),
                    Err(e) => LaunchOutcome::SpawnFailed(e.to_string()),
                };
                let _ = tx.send(outcome);
            });

        if let Err(e) = spawned {
            tracing::warn!(error = %e, "failed to start process watcher");
        }
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, program: &Path, command_line: &CommandLine) {
        tracing::debug!(
            program = %program.display(),
            command_line = %command_line,
            "launching speech process"
        );

        match platform::spawn(program, command_line) {
            Ok(child) => {
                tracing::trace!(pid = child.id(), "speech process started");
                self.watch(child);
            }
            Err(e) => {
                tracing::warn!(
                    program = %program.display(),
                    error = %e,
                    "failed to start speech process"
                );
                self.report(LaunchOutcome::SpawnFailed(e.to_string()));
            }
        }
    }
}

#[cfg(unix)]
mod platform {
    use std::io;
    use std::os::unix::process::CommandExt;
    use std::path::Path;
    use std::process::{Child, Command, Stdio};

    use crate::speech::CommandLine;

    /// A started child process
    pub(super) struct Spawned(Child);

    impl Spawned {
        pub(super) fn id(&self) -> u32 {
            self.0.id()
        }

        pub(super) fn wait(mut self) -> io::Result<Option<i32>> {
            self.0.wait().map(|status| status.code())
        }
    }

    /// `program` with argv taken from `command_line`, first token as argv[0]
    pub(super) fn command(program: &Path, command_line: &CommandLine) -> Command {
        let mut args = command_line.to_args().into_iter();
        let mut command = Command::new(program);
        if let Some(arg0) = args.next() {
            command.arg0(arg0);
        }
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }

    pub(super) fn spawn(program: &Path, command_line: &CommandLine) -> io::Result<Spawned> {
        command(program, command_line).spawn().map(Spawned)
    }
}

// Deny by default, allowed here for the Win32 process calls
#[cfg(windows)]
#[allow(unsafe_code)]
mod platform {
    use std::io;
    use std::iter;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;
    use std::ptr;

    use windows_sys::Win32::Foundation::{CloseHandle, HANDLE, WAIT_FAILED};
    use windows_sys::Win32::System::Threading::{
        CREATE_NO_WINDOW, CreateProcessW, GetExitCodeProcess, INFINITE, PROCESS_INFORMATION,
        STARTUPINFOW, WaitForSingleObject,
    };

    use crate::speech::CommandLine;

    /// A started child process, owning its process handle
    pub(super) struct Spawned {
        process: HANDLE,
        pid: u32,
    }

    // SAFETY: process handles may be waited on and closed from any thread
    unsafe impl Send for Spawned {}

    impl Spawned {
        pub(super) const fn id(&self) -> u32 {
            self.pid
        }

        #[allow(clippy::cast_possible_wrap)]
        pub(super) fn wait(self) -> io::Result<Option<i32>> {
            // SAFETY: `process` is a live handle owned by `self`
            if unsafe { WaitForSingleObject(self.process, INFINITE) } == WAIT_FAILED {
                return Err(io::Error::last_os_error());
            }

            let mut code = 0u32;
            // SAFETY: as above; `code` outlives the call
            if unsafe { GetExitCodeProcess(self.process, &mut code) } == 0 {
                return Err(io::Error::last_os_error());
            }

            Ok(Some(code as i32))
        }
    }

    impl Drop for Spawned {
        fn drop(&mut self) {
            // SAFETY: handle is owned and closed exactly once
            unsafe {
                CloseHandle(self.process);
            }
        }
    }

    /// Start `program` with `command_line` as its entire command line and no console window
    #[allow(clippy::cast_possible_truncation)]
    pub(super) fn spawn(program: &Path, command_line: &CommandLine) -> io::Result<Spawned> {
        let application: Vec<u16> = program
            .as_os_str()
            .encode_wide()
            .chain(iter::once(0))
            .collect();
        // CreateProcessW may modify the command line buffer in place
        let mut line: Vec<u16> = command_line
            .as_wide()
            .iter()
            .copied()
            .chain(iter::once(0))
            .collect();

        // SAFETY: all-zero is a valid value for these plain C structs
        let mut startup: STARTUPINFOW = unsafe { std::mem::zeroed() };
        startup.cb = std::mem::size_of::<STARTUPINFOW>() as u32;
        // SAFETY: as above
        let mut info: PROCESS_INFORMATION = unsafe { std::mem::zeroed() };

        // SAFETY: both strings are NUL-terminated and live across the call;
        // `startup` and `info` are valid for reads and writes respectively
        let created = unsafe {
            CreateProcessW(
                application.as_ptr(),
                line.as_mut_ptr(),
                ptr::null(),
                ptr::null(),
                0,
                CREATE_NO_WINDOW,
                ptr::null(),
                ptr::null(),
                &startup,
                &mut info,
            )
        };
        if created == 0 {
            return Err(io::Error::last_os_error());
        }

        // SAFETY: thread handle returned by CreateProcessW and not used again
        unsafe {
            CloseHandle(info.hThread);
        }

        Ok(Spawned {
            process: info.hProcess,
            pid: info.dwProcessId,
        })
    }
}
