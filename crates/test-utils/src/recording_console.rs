use std::sync::{Arc, Mutex};

use keepalive::console::Console;

/// A console that records every line in memory.
///
/// Clones share the same buffer, so a test can keep one clone and hand the
/// other to the supervisor.
#[derive(Debug, Clone, Default)]
pub struct RecordingConsole {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Whether any recorded line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().unwrap().iter().any(|l| l.contains(needle))
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.contains(needle))
            .count()
    }
}

impl Console for RecordingConsole {
    fn line(&mut self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }
}
