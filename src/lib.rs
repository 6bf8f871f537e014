// src/lib.rs

pub mod cli;
pub mod command_line;
pub mod config;
pub mod console;
pub mod error_text;
pub mod errors;
pub mod logging;
pub mod process;
pub mod supervisor;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::CliArgs;
use crate::command_line::CommandLine;
use crate::config::SupervisorConfig;
use crate::console::{Console, WriterConsole};
use crate::errors::Result;
use crate::process::OsLauncher;
use crate::supervisor::Supervisor;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - command-line assembly
/// - timing config
/// - Ctrl-C / SIGTERM handling
/// - the supervisor with the real OS launcher and a stdout console
pub async fn run(args: CliArgs) -> Result<()> {
    let command = CommandLine::new(args.command.iter().cloned())?;
    let config = SupervisorConfig::from_args(&args)?;

    let mut console = WriterConsole::stdout();
    console.line(&format!("command line:\t{command}"));

    let shutdown = CancellationToken::new();
    spawn_shutdown_listener(shutdown.clone());

    let mut supervisor = Supervisor::new(command, OsLauncher, console, config);
    supervisor.run(shutdown).await
}

/// Cancel `token` on Ctrl-C (and SIGTERM on Unix).
///
/// The SIGTERM handler is registered before this returns, so a signal sent
/// once the first process is reported is never lost to the default action.
fn spawn_shutdown_listener(token: CancellationToken) {
    let signal = shutdown_signal();
    tokio::spawn(async move {
        signal.await;
        info!("shutdown signal received");
        token.cancel();
    });
}

#[cfg(unix)]
fn shutdown_signal() -> impl Future<Output = ()> + Send + 'static {
    use tokio::signal::unix::{SignalKind, signal};

    let terminate = signal(SignalKind::terminate())
        .inspect_err(|e| warn!(error = %e, "failed to listen for SIGTERM"))
        .ok();

    async move {
        match terminate {
            Some(mut terminate) => {
                tokio::select! {
                    _ = wait_for_ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            None => wait_for_ctrl_c().await,
        }
    }
}

#[cfg(not(unix))]
fn shutdown_signal() -> impl Future<Output = ()> + Send + 'static {
    wait_for_ctrl_c()
}

/// Resolves on Ctrl-C. If the handler cannot be installed this never
/// resolves, leaving termination to the OS.
async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
