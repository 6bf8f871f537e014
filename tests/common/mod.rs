#![allow(dead_code, unused_imports)]

use std::time::Duration;

use keepalive::command_line::CommandLine;
use keepalive::config::SupervisorConfig;

pub use keepalive_test_utils::{init_tracing, with_timeout};

/// Command line used with fake launchers; its contents never reach an OS.
pub fn fake_command() -> CommandLine {
    CommandLine::new(["myapp", "--serve"]).expect("non-empty command")
}

/// Short cadence for tests that spawn real processes.
pub fn fast_config() -> SupervisorConfig {
    SupervisorConfig {
        poll_interval: Duration::from_millis(50),
        backoff: Duration::from_millis(50),
        stop_grace: Duration::from_secs(2),
    }
}
