// src/process/backend.rs

//! Pluggable launch / liveness abstraction.
//!
//! The supervisor never touches `tokio::process` directly. It asks a
//! [`Launcher`] for a new process and queries the returned
//! [`ProcessHandle`] for its exit status. Production code uses
//! [`super::OsLauncher`]; tests provide launchers that script successes,
//! failures and exits.

use std::fmt;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::process::ExitStatus;
use std::time::Duration;

use crate::command_line::CommandLine;

/// Future returned by [`ProcessHandle::stop`].
pub type StopFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

/// How a supervised process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// Exit code, or `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl From<ExitStatus> for ProcessExit {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// An owned handle to one launched process.
///
/// Dropping the handle releases the underlying OS resource; it must not
/// kill the process.
pub trait ProcessHandle: Send {
    /// OS process identifier (informational).
    fn id(&self) -> u32;

    /// Non-blocking exit query.
    ///
    /// - `Ok(None)`: still running.
    /// - `Ok(Some(exit))`: the process has exited.
    /// - `Err(_)`: the OS query itself failed.
    fn try_exit(&mut self) -> io::Result<Option<ProcessExit>>;

    /// Ask the process to stop, waiting up to `grace` before forcing it.
    fn stop(&mut self, grace: Duration) -> StopFuture<'_>;
}

/// Creates processes from a command line.
pub trait Launcher: Send {
    type Process: ProcessHandle;

    /// Launch `command`. Errors are returned as raw `io::Error`s so the
    /// caller can render the platform error text.
    fn launch(&mut self, command: &CommandLine) -> io::Result<Self::Process>;
}
