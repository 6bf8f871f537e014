// src/console.rs

//! Operator-facing output sink.
//!
//! Status lines (process started, terminated, relaunch failed, ...) are
//! written through a [`Console`] rather than straight to stdout, so tests
//! can capture them. Diagnostics for developers go through `tracing`
//! instead; see [`crate::logging`].

use std::io::{self, Write};

/// Destination for operator status lines.
pub trait Console: Send {
    /// Write one line of output.
    fn line(&mut self, message: &str);
}

/// Console writing each line to an `io::Write`.
#[derive(Debug)]
pub struct WriterConsole<W> {
    writer: W,
}

impl<W: Write + Send> WriterConsole<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterConsole<io::Stdout> {
    /// The production console: standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Console for WriterConsole<W> {
    fn line(&mut self, message: &str) {
        // Output failures (closed pipe, full disk) must not stop supervision.
        let _ = writeln!(self.writer, "{message}");
        let _ = self.writer.flush();
    }
}
