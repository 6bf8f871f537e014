use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::Instant;

use keepalive::command_line::CommandLine;
use keepalive::process::{Launcher, ProcessExit, ProcessHandle, StopFuture};

/// What the next launch attempt does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchScript {
    /// Launch succeeds; the process reports "running" for `alive_checks`
    /// liveness queries and then exits with `exit_code`.
    Spawn { alive_checks: u32, exit_code: i32 },
    /// Launch succeeds but every exit-status query fails.
    SpawnBrokenQuery,
    /// Launch fails with the given raw OS error code.
    Fail(i32),
}

impl LaunchScript {
    pub fn exits_immediately() -> Self {
        LaunchScript::Spawn {
            alive_checks: 0,
            exit_code: 1,
        }
    }

    pub fn runs_forever() -> Self {
        LaunchScript::Spawn {
            alive_checks: u32::MAX,
            exit_code: 0,
        }
    }
}

/// Everything the fake launcher and its processes observed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeEvent {
    Launched { pid: u32 },
    LaunchFailed,
    Checked { pid: u32, alive: bool },
    QueryFailed { pid: u32 },
    Stopped { pid: u32 },
    Closed { pid: u32 },
}

impl FakeEvent {
    pub fn is_launch_attempt(&self) -> bool {
        matches!(self, FakeEvent::Launched { .. } | FakeEvent::LaunchFailed)
    }

    pub fn is_liveness_check(&self) -> bool {
        matches!(self, FakeEvent::Checked { .. } | FakeEvent::QueryFailed { .. })
    }
}

#[derive(Debug, Default)]
struct ProbeState {
    events: Vec<FakeEvent>,
    launch_times: Vec<Instant>,
    open_handles: usize,
    max_open_at_launch: usize,
}

/// Shared view into a [`FakeLauncher`], kept by the test after the launcher
/// has been moved into a supervisor.
#[derive(Debug, Clone, Default)]
pub struct FakeProbe {
    state: Arc<Mutex<ProbeState>>,
}

impl FakeProbe {
    fn lock(&self) -> MutexGuard<'_, ProbeState> {
        self.state.lock().unwrap()
    }

    pub fn events(&self) -> Vec<FakeEvent> {
        self.lock().events.clone()
    }

    /// Instants of every launch attempt, successful or not.
    pub fn launch_times(&self) -> Vec<Instant> {
        self.lock().launch_times.clone()
    }

    pub fn launch_attempts(&self) -> usize {
        self.lock().launch_times.len()
    }

    /// Fake process handles currently alive (not yet dropped).
    pub fn open_handles(&self) -> usize {
        self.lock().open_handles
    }

    /// Largest number of handles already open when a new one was created.
    pub fn max_open_at_launch(&self) -> usize {
        self.lock().max_open_at_launch
    }

    fn push(&self, event: FakeEvent) {
        self.lock().events.push(event);
    }
}

/// A launcher that never touches the OS.
///
/// Launch attempts follow the script, then repeat `fallback` forever.
#[derive(Debug)]
pub struct FakeLauncher {
    script: VecDeque<LaunchScript>,
    fallback: LaunchScript,
    next_pid: u32,
    probe: FakeProbe,
}

impl FakeLauncher {
    pub fn new(fallback: LaunchScript) -> Self {
        Self {
            script: VecDeque::new(),
            fallback,
            next_pid: 1000,
            probe: FakeProbe::default(),
        }
    }

    pub fn with_script(mut self, steps: impl IntoIterator<Item = LaunchScript>) -> Self {
        self.script.extend(steps);
        self
    }

    pub fn probe(&self) -> FakeProbe {
        self.probe.clone()
    }
}

impl Launcher for FakeLauncher {
    type Process = FakeProcess;

    fn launch(&mut self, _command: &CommandLine) -> io::Result<FakeProcess> {
        let step = self.script.pop_front().unwrap_or(self.fallback);

        let mut state = self.probe.lock();
        state.launch_times.push(Instant::now());

        let (alive_checks, exit_code, broken_query) = match step {
            LaunchScript::Fail(code) => {
                state.events.push(FakeEvent::LaunchFailed);
                return Err(io::Error::from_raw_os_error(code));
            }
            LaunchScript::Spawn {
                alive_checks,
                exit_code,
            } => (alive_checks, exit_code, false),
            LaunchScript::SpawnBrokenQuery => (0, 0, true),
        };

        state.max_open_at_launch = state.max_open_at_launch.max(state.open_handles);
        state.open_handles += 1;

        let pid = self.next_pid;
        self.next_pid += 1;
        state.events.push(FakeEvent::Launched { pid });
        drop(state);

        Ok(FakeProcess {
            pid,
            remaining_alive: alive_checks,
            exit_code,
            broken_query,
            stopped: false,
            probe: self.probe.clone(),
        })
    }
}

/// Process handle produced by [`FakeLauncher`].
#[derive(Debug)]
pub struct FakeProcess {
    pid: u32,
    remaining_alive: u32,
    exit_code: i32,
    broken_query: bool,
    stopped: bool,
    probe: FakeProbe,
}

impl ProcessHandle for FakeProcess {
    fn id(&self) -> u32 {
        self.pid
    }

    fn try_exit(&mut self) -> io::Result<Option<ProcessExit>> {
        if self.broken_query {
            self.probe.push(FakeEvent::QueryFailed { pid: self.pid });
            return Err(io::Error::other("exit status unavailable"));
        }

        if !self.stopped && self.remaining_alive > 0 {
            self.remaining_alive -= 1;
            self.probe.push(FakeEvent::Checked {
                pid: self.pid,
                alive: true,
            });
            return Ok(None);
        }

        self.probe.push(FakeEvent::Checked {
            pid: self.pid,
            alive: false,
        });
        Ok(Some(ProcessExit {
            code: Some(self.exit_code),
        }))
    }

    fn stop(&mut self, _grace: Duration) -> StopFuture<'_> {
        Box::pin(async move {
            self.stopped = true;
            self.probe.push(FakeEvent::Stopped { pid: self.pid });
            anyhow::Ok(())
        })
    }
}

impl Drop for FakeProcess {
    fn drop(&mut self) {
        let mut state = self.probe.lock();
        state.open_handles -= 1;
        state.events.push(FakeEvent::Closed { pid: self.pid });
    }
}
