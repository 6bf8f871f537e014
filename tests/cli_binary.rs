// tests/cli_binary.rs

use assert_cmd::Command;
use predicates::prelude::*;

fn keepalive() -> Command {
    Command::cargo_bin("keepalive").expect("keepalive binary is built")
}

#[test]
fn no_command_prints_usage_and_exits_1() {
    keepalive()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("usage: "))
        .stdout(predicate::str::contains("at least one command-line token"))
        .stdout(predicate::str::contains("example: ").count(2));
}

#[test]
fn first_launch_failure_exits_2() {
    keepalive()
        .arg("/nonexistent/keepalive-test-binary")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "command line:\t/nonexistent/keepalive-test-binary",
        ))
        .stdout(predicate::str::contains("failed to start process: "))
        .stdout(predicate::str::contains("initial launch failed"));
}

#[test]
fn invalid_poll_interval_is_a_config_error() {
    keepalive()
        .args(["--poll-interval", "0s", "sleep", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--poll-interval"));
}

#[test]
fn invalid_option_value_exits_1_not_2() {
    keepalive()
        .args(["--log-level", "loud", "sleep", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("loud"));
}

#[test]
fn oversized_duration_is_a_config_error() {
    keepalive()
        .args(["--poll-interval", "999999999999999999h", "sleep", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("too large"));
}

#[cfg(unix)]
#[test]
fn sigterm_stops_child_and_exits_0() -> Result<(), Box<dyn std::error::Error>> {
    use std::io::{BufRead, BufReader};
    use std::process::{Command as StdCommand, Stdio};
    use std::time::{Duration, Instant};

    use assert_cmd::cargo::CommandCargoExt;
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let mut supervisor = StdCommand::cargo_bin("keepalive")?
        .args(["sleep", "30"])
        .stdout(Stdio::piped())
        .spawn()?;

    let stdout = supervisor.stdout.take().ok_or("stdout not captured")?;
    let mut lines = BufReader::new(stdout).lines();
    let child_pid: i32 = loop {
        let line = lines
            .next()
            .ok_or("keepalive closed stdout before reporting a process id")??;
        if let Some(pid) = line.strip_prefix("process id: ") {
            break pid.trim().parse()?;
        }
    };

    kill(Pid::from_raw(i32::try_from(supervisor.id())?), Signal::SIGTERM)?;

    let deadline = Instant::now() + Duration::from_secs(15);
    let status = loop {
        if let Some(status) = supervisor.try_wait()? {
            break status;
        }
        if Instant::now() > deadline {
            let _ = supervisor.kill();
            let _ = kill(Pid::from_raw(child_pid), Signal::SIGKILL);
            panic!("keepalive did not exit after SIGTERM");
        }
        std::thread::sleep(Duration::from_millis(20));
    };

    assert_eq!(status.code(), Some(0));
    // The supervised child was stopped and reaped before keepalive exited.
    assert!(kill(Pid::from_raw(child_pid), None).is_err());
    drop(lines);

    Ok(())
}
