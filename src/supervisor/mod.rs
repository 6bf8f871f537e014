// src/supervisor/mod.rs

//! The process supervisor.
//!
//! [`Supervisor`] owns the command line and the single supervised process
//! handle. The synchronous building blocks (`start_process`,
//! `is_process_alive`) live here; the async loop that strings them together
//! with poll / backoff waits and shutdown handling is in [`run_loop`].

pub mod run_loop;

use tracing::{debug, info, warn};

use crate::command_line::CommandLine;
use crate::config::SupervisorConfig;
use crate::console::Console;
use crate::error_text::describe_io_error;
use crate::process::{Launcher, ProcessExit, ProcessHandle, ProcessSlot};

/// Where the supervisor is in its lifecycle. Derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    /// No process has been launched successfully yet.
    NoProcess,
    /// The held process was running at the last liveness check.
    Running,
    /// The held process has exited and a relaunch is due or failed.
    Restarting,
}

/// Keeps one command running, relaunching it whenever it exits.
pub struct Supervisor<L: Launcher, C: Console> {
    command: CommandLine,
    launcher: L,
    console: C,
    config: SupervisorConfig,
    slot: ProcessSlot<L::Process>,
    /// Exit observed on the held process, cleared by the next launch.
    observed_exit: Option<ProcessExit>,
    /// Set when the held process is known dead but its exit status is not.
    query_failed: bool,
    last_launch_error: Option<String>,
}

impl<L: Launcher, C: Console> Supervisor<L, C> {
    /// Create an idle supervisor. Performs no I/O.
    pub fn new(command: CommandLine, launcher: L, console: C, config: SupervisorConfig) -> Self {
        Self {
            command,
            launcher,
            console,
            config,
            slot: ProcessSlot::new(),
            observed_exit: None,
            query_failed: false,
            last_launch_error: None,
        }
    }

    /// Identifier of the held process, if any.
    pub fn process_id(&self) -> Option<u32> {
        self.slot.get().map(ProcessHandle::id)
    }

    /// Exit status observed by the last liveness check, if it found one.
    pub fn last_exit(&self) -> Option<ProcessExit> {
        self.observed_exit
    }

    pub fn state(&self) -> SupervisorState {
        if self.slot.is_empty() {
            SupervisorState::NoProcess
        } else if self.observed_exit.is_some() || self.query_failed {
            SupervisorState::Restarting
        } else {
            SupervisorState::Running
        }
    }

    /// Launch a new process from the bound command line.
    ///
    /// On success the previous handle (if any) is released and replaced. On
    /// failure the previous handle is kept and the OS error text is written
    /// to the console.
    pub fn start_process(&mut self) -> bool {
        match self.launcher.launch(&self.command) {
            Ok(process) => {
                let pid = process.id();
                self.slot.replace(process);
                self.observed_exit = None;
                self.query_failed = false;
                self.last_launch_error = None;

                info!(pid, command = %self.command, "process started");
                self.console.line("process started");
                self.console.line(&format!("process id: {pid}"));
                true
            }
            Err(err) => {
                let reason = describe_io_error(&err);
                warn!(command = %self.command, error = %reason, "failed to start process");
                self.console
                    .line(&format!("failed to start process: {reason}"));
                self.last_launch_error = Some(reason);
                false
            }
        }
    }

    /// Whether the held process is still running.
    ///
    /// False when nothing was ever launched, when the process has exited, or
    /// when the OS could not be asked.
    pub fn is_process_alive(&mut self) -> bool {
        let Some(process) = self.slot.get_mut() else {
            return false;
        };

        match process.try_exit() {
            Ok(None) => true,
            Ok(Some(exit)) => {
                self.observed_exit = Some(exit);
                false
            }
            Err(e) => {
                debug!(pid = process.id(), error = %e, "exit status query failed; treating process as terminated");
                self.query_failed = true;
                false
            }
        }
    }
}
