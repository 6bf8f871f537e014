// src/cli.rs

//! CLI argument parsing using `clap`.

use std::ffi::OsString;
use std::io::{self, Write};

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use tracing_subscriber::filter::LevelFilter;

use crate::errors::{KeepaliveError, Result};

/// Command-line arguments for `keepalive`.
///
/// Options must come before the command; the first positional token and
/// everything after it (hyphenated arguments included) is the command to
/// supervise.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "keepalive",
    version,
    about = "Launch a command and relaunch it whenever it exits.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `KEEPALIVE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Wait between liveness checks (e.g. `5s`, `500ms`).
    #[arg(long, value_name = "DURATION", default_value = "5s")]
    pub poll_interval: String,

    /// Extra wait after a failed relaunch.
    #[arg(long, value_name = "DURATION", default_value = "5s")]
    pub backoff: String,

    /// Time a stopping process gets before it is killed on shutdown.
    #[arg(long, value_name = "DURATION", default_value = "5s")]
    pub stop_grace: String,

    /// Command line to keep alive.
    #[arg(
        value_name = "COMMAND",
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Parse the process arguments.
pub fn parse() -> Result<CliArgs> {
    parse_from(std::env::args_os())
}

/// Parse `args` (including the program name).
///
/// `--help` and `--version` print and exit 0 as usual. Every other clap
/// error becomes a [`KeepaliveError::ConfigError`], so bad options exit 1
/// and exit code 2 stays reserved for a failed first launch.
pub fn parse_from<I, T>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CliArgs::try_parse_from(args).or_else(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => Err(KeepaliveError::ConfigError(
            err.to_string().trim_end().to_string(),
        )),
    })
}

/// Name the binary was invoked as, for usage text.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "keepalive".to_string())
}

/// Print the usage text shown when no command was given.
pub fn print_usage<W: Write>(out: &mut W, program: &str) -> io::Result<()> {
    writeln!(out, "usage: {program} <command line>...")?;
    writeln!(out, "note: at least one command-line token is required")?;
    if cfg!(windows) {
        writeln!(out, "example: {program} C:\\Windows\\notepad.exe")?;
        writeln!(
            out,
            "example: {program} \"C:\\Program Files\\MyApp\\myapp.exe\" -arg1 -arg2"
        )?;
    } else {
        writeln!(out, "example: {program} /usr/bin/top")?;
        writeln!(out, "example: {program} python3 my_script.py --port 8080")?;
    }
    Ok(())
}
