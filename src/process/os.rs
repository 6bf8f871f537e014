// src/process/os.rs

//! Real OS processes via `tokio::process`.

use std::io;
use std::time::Duration;

use anyhow::Context;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::command_line::CommandLine;

use super::backend::{Launcher, ProcessExit, ProcessHandle, StopFuture};

/// Launcher spawning the command directly, without an intermediate shell.
///
/// - Windows: the program is the first token and the rest of the command
///   line is passed verbatim (`raw_arg`), so the target sees exactly the
///   joined command-line string.
/// - Unix: the tokens become the argv vector, which is what the joined
///   string describes.
///
/// Stdio is inherited so the supervised process writes to the same console.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsLauncher;

impl Launcher for OsLauncher {
    type Process = OsProcess;

    fn launch(&mut self, command: &CommandLine) -> io::Result<OsProcess> {
        let mut cmd = Command::new(command.program());

        #[cfg(windows)]
        {
            if !command.args().is_empty() {
                cmd.raw_arg(crate::command_line::join_tokens(command.args()));
            }
        }
        #[cfg(not(windows))]
        {
            cmd.args(command.args());
        }

        // Replacing a handle only releases it; the process keeps running.
        cmd.kill_on_drop(false);

        let child = cmd.spawn()?;
        let id = child.id().unwrap_or_default();
        debug!(pid = id, command = %command, "spawned child process");

        Ok(OsProcess { child, id })
    }
}

/// Handle to a process spawned by [`OsLauncher`].
#[derive(Debug)]
pub struct OsProcess {
    child: Child,
    id: u32,
}

impl ProcessHandle for OsProcess {
    fn id(&self) -> u32 {
        self.id
    }

    fn try_exit(&mut self) -> io::Result<Option<ProcessExit>> {
        Ok(self.child.try_wait()?.map(ProcessExit::from))
    }

    fn stop(&mut self, grace: Duration) -> StopFuture<'_> {
        Box::pin(self.terminate(grace))
    }
}

impl OsProcess {
    /// SIGTERM, wait up to `grace`, then kill. Windows has no polite
    /// equivalent for arbitrary processes, so it kills straight away.
    async fn terminate(&mut self, grace: Duration) -> anyhow::Result<()> {
        if self.child.try_wait()?.is_some() {
            return Ok(());
        }

        #[cfg(unix)]
        {
            if request_termination(self.id) {
                match tokio::time::timeout(grace, self.child.wait()).await {
                    Ok(status) => {
                        let status =
                            status.with_context(|| format!("waiting for process {}", self.id))?;
                        info!(pid = self.id, exit = %ProcessExit::from(status), "process stopped");
                        return Ok(());
                    }
                    Err(_) => {
                        warn!(
                            pid = self.id,
                            ?grace,
                            "process did not exit within grace period; killing"
                        );
                    }
                }
            }
        }
        #[cfg(not(unix))]
        let _ = grace;

        self.child
            .kill()
            .await
            .with_context(|| format!("killing process {}", self.id))?;
        info!(pid = self.id, "process killed");
        Ok(())
    }
}

/// Send SIGTERM; returns whether the signal was delivered.
#[cfg(unix)]
fn request_termination(pid: u32) -> bool {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let Ok(raw) = i32::try_from(pid) else {
        return false;
    };

    match kill(Pid::from_raw(raw), Signal::SIGTERM) {
        Ok(()) => true,
        Err(e) => {
            warn!(pid, error = %e, "failed to send SIGTERM");
            false
        }
    }
}
