// src/config.rs

//! Supervisor timing configuration.
//!
//! There is no config file: everything comes from CLI flags, which default
//! to the classic keep-alive cadence of five seconds.

use std::time::Duration;

use crate::cli::CliArgs;
use crate::errors::{KeepaliveError, Result};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(5);
pub const DEFAULT_STOP_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupervisorConfig {
    /// Wait between two liveness checks.
    pub poll_interval: Duration,
    /// Extra wait after a failed relaunch.
    pub backoff: Duration,
    /// How long a stopping process may take before it is killed.
    pub stop_grace: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            backoff: DEFAULT_BACKOFF,
            stop_grace: DEFAULT_STOP_GRACE,
        }
    }
}

impl SupervisorConfig {
    /// Build and validate the config from parsed CLI flags.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = Self {
            poll_interval: parse_flag("--poll-interval", &args.poll_interval)?,
            backoff: parse_flag("--backoff", &args.backoff)?,
            stop_grace: parse_flag("--stop-grace", &args.stop_grace)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(KeepaliveError::ConfigError(
                "--poll-interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_flag(flag: &str, value: &str) -> Result<Duration> {
    parse_duration(value).map_err(|e| KeepaliveError::ConfigError(format!("{flag}: {e}")))
}

/// Parse a simple duration string like `"5s"`, `"250ms"`, `"1m"`, `"2h"`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the boundary between digits and suffix.
    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| format!("duration '{s}' is missing a unit suffix"))?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{num_part}': {e}"))?;
    let unit = unit_part.trim().to_lowercase();
    let scaled = |factor: u64| {
        value
            .checked_mul(factor)
            .map(Duration::from_secs)
            .ok_or_else(|| format!("duration '{s}' is too large"))
    };

    match unit.as_str() {
        "ms" => Ok(Duration::from_millis(value)),
        "s" => Ok(Duration::from_secs(value)),
        "m" => scaled(60),
        "h" => scaled(60 * 60),
        _ => Err(format!(
            "unsupported duration unit '{unit}'; expected ms, s, m, or h"
        )),
    }
}
