// tests/supervisor_os_process.rs
//
// These tests spawn real processes and rely on POSIX utilities (`true`,
// `sleep`, `sh`).
#![cfg(unix)]

mod common;
use crate::common::{fast_config, init_tracing, with_timeout};

use std::error::Error;
use std::fs;
use std::time::Duration;

use tempfile::TempDir;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use keepalive::command_line::CommandLine;
use keepalive::process::{Launcher, OsLauncher, ProcessHandle};
use keepalive::supervisor::Supervisor;
use keepalive_test_utils::RecordingConsole;

type TestResult = Result<(), Box<dyn Error>>;

fn os_supervisor(tokens: &[&str]) -> (Supervisor<OsLauncher, RecordingConsole>, RecordingConsole) {
    let console = RecordingConsole::new();
    let command = CommandLine::new(tokens.iter().copied()).expect("non-empty command");
    (
        Supervisor::new(command, OsLauncher, console.clone(), fast_config()),
        console,
    )
}

/// Poll liveness until it reports false or `limit` elapses.
async fn wait_until_dead<C: keepalive::console::Console>(
    sup: &mut Supervisor<OsLauncher, C>,
    limit: Duration,
) -> bool {
    let deadline = Instant::now() + limit;
    while Instant::now() < deadline {
        if !sup.is_process_alive() {
            return true;
        }
        sleep(Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn short_lived_process_becomes_not_alive() -> TestResult {
    init_tracing();

    let (mut sup, console) = os_supervisor(&["true"]);
    assert!(sup.start_process());
    assert!(sup.process_id().is_some_and(|pid| pid > 0));

    assert!(wait_until_dead(&mut sup, Duration::from_secs(5)).await);
    assert_eq!(sup.last_exit().and_then(|e| e.code), Some(0));
    assert!(console.contains("process id: "));

    Ok(())
}

#[tokio::test]
async fn running_process_is_alive_until_stopped() -> TestResult {
    init_tracing();

    let (mut sup, _console) = os_supervisor(&["sleep", "30"]);
    assert!(sup.start_process());
    assert!(sup.is_process_alive());

    sup.stop_process().await?;
    assert!(wait_until_dead(&mut sup, Duration::from_secs(5)).await);
    // SIGTERM: no exit code.
    assert_eq!(sup.last_exit().map(|e| e.code), Some(None));

    Ok(())
}

#[tokio::test]
async fn missing_program_reports_os_error_text() -> TestResult {
    init_tracing();

    let (mut sup, console) = os_supervisor(&["/nonexistent/keepalive-test-binary"]);
    assert!(!sup.start_process());
    assert!(!sup.is_process_alive());
    assert!(
        console.contains("failed to start process: No such file or directory"),
        "console: {:?}",
        console.lines()
    );

    Ok(())
}

#[tokio::test]
async fn supervisor_restarts_exiting_command() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let marker = dir.path().join("launches");
    let script = format!("echo run >> '{}'", marker.display());

    let (mut sup, console) = os_supervisor(&["sh", "-c", &script]);
    let shutdown = CancellationToken::new();

    let canceller = {
        let token = shutdown.clone();
        let marker = marker.clone();
        tokio::spawn(async move {
            // Wait for a few launches to land in the marker file.
            loop {
                let runs = fs::read_to_string(&marker).map(|s| s.lines().count()).unwrap_or(0);
                if runs >= 3 {
                    break;
                }
                sleep(Duration::from_millis(20)).await;
            }
            token.cancel();
        })
    };

    with_timeout(sup.run(shutdown)).await?;
    canceller.await?;

    let runs = fs::read_to_string(&marker)?.lines().count();
    assert!(runs >= 3, "expected at least 3 launches, saw {runs}");
    assert!(console.count_containing("process terminated") >= 2);

    Ok(())
}

#[tokio::test]
async fn launcher_accepts_arguments_with_spaces() -> TestResult {
    init_tracing();

    let dir = TempDir::new()?;
    let target = dir.path().join("file with spaces");
    let target_str = target.to_string_lossy().into_owned();

    let command = CommandLine::new(["touch", target_str.as_str()])?;
    assert!(command.as_str().contains('"'));

    let mut launcher = OsLauncher;
    let mut process = launcher.launch(&command)?;

    let deadline = Instant::now() + Duration::from_secs(5);
    while process.try_exit()?.is_none() && Instant::now() < deadline {
        sleep(Duration::from_millis(20)).await;
    }
    assert!(target.exists());

    Ok(())
}
