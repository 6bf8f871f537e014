// src/supervisor/run_loop.rs

//! The supervision loop.
//!
//! Liveness is sampled at a fixed cadence (`poll_interval`). When the
//! process is found dead it is relaunched exactly once before the next
//! check; a failed relaunch adds `backoff` on top of the regular wait. Both
//! waits race the shutdown token, which is the only way out of the loop
//! besides a failed first launch.

use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::console::Console;
use crate::errors::{KeepaliveError, Result};
use crate::process::{Launcher, ProcessHandle};

use super::Supervisor;

impl<L: Launcher, C: Console> Supervisor<L, C> {
    /// Run until `shutdown` is cancelled.
    ///
    /// Returns [`KeepaliveError::InitialLaunch`] if the very first launch
    /// fails; that attempt is not retried.
    pub async fn run(&mut self, shutdown: CancellationToken) -> Result<()> {
        self.console.line("keeping process alive");
        self.console.line("press Ctrl+C to stop\n");

        if !self.start_process() {
            self.console.line("initial launch failed; exiting");
            return Err(KeepaliveError::InitialLaunch {
                command: self.command.to_string(),
                reason: self
                    .last_launch_error
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        info!(
            command = %self.command,
            poll_interval = ?self.config.poll_interval,
            backoff = ?self.config.backoff,
            "supervision loop started"
        );

        loop {
            if !self.is_process_alive() {
                match self.observed_exit {
                    Some(exit) => self
                        .console
                        .line(&format!("process terminated ({exit}), restarting...")),
                    None => self.console.line("process terminated, restarting..."),
                }

                if !self.start_process() {
                    self.console.line(&format!(
                        "launch failed, retrying in {}...",
                        humanize(self.config.backoff)
                    ));
                    if pause(self.config.backoff, &shutdown).await {
                        break;
                    }
                }
            }

            if pause(self.config.poll_interval, &shutdown).await {
                break;
            }
        }

        self.console
            .line("shutdown requested; stopping supervised process");
        self.stop_process().await?;
        info!("supervision loop finished");
        Ok(())
    }

    /// Stop the held process if it is still running.
    pub async fn stop_process(&mut self) -> Result<()> {
        if !self.is_process_alive() {
            debug!("no running process to stop");
            return Ok(());
        }

        let grace = self.config.stop_grace;
        if let Some(process) = self.slot.get_mut() {
            info!(pid = process.id(), ?grace, "stopping process");
            process.stop(grace).await?;
        }
        Ok(())
    }
}

/// Sleep for `duration` unless shutdown comes first. Returns true on shutdown.
async fn pause(duration: Duration, shutdown: &CancellationToken) -> bool {
    tokio::select! {
        _ = shutdown.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

fn humanize(duration: Duration) -> String {
    if duration.subsec_millis() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", duration.as_millis())
    }
}
