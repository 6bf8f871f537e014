// src/logging.rs

//! Logging setup for `keepalive` using `tracing` + `tracing-subscriber`.
//!
//! Filter priority:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `KEEPALIVE_LOG` environment variable, as an `EnvFilter` directive
//!    string (e.g. "info" or "keepalive::supervisor=debug")
//! 3. `warn`
//!
//! Diagnostics go to STDERR; operator status lines own stdout.

use anyhow::Result;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable consulted when `--log-level` is absent.
pub const LOG_ENV: &str = "KEEPALIVE_LOG";

/// Initialise the global logging subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_env_filter(build_filter(cli_level, LOG_ENV))
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn build_filter(cli_level: Option<LogLevel>, env_var: &str) -> EnvFilter {
    match cli_level {
        Some(level) => EnvFilter::builder()
            .with_default_directive(LevelFilter::from(level).into())
            .parse_lossy(""),
        None => EnvFilter::try_from_env(env_var).unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}
