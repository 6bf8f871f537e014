// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeepaliveError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("initial launch of `{command}` failed: {reason}")]
    InitialLaunch { command: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeepaliveError {
    /// Process exit status the binary reports for this error.
    ///
    /// A failed first launch gets its own status so callers can tell it
    /// apart from a usage mistake.
    pub fn exit_code(&self) -> i32 {
        match self {
            KeepaliveError::InitialLaunch { .. } => 2,
            _ => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, KeepaliveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_launch_has_distinct_exit_code() {
        let err = KeepaliveError::InitialLaunch {
            command: "app".to_string(),
            reason: "not found".to_string(),
        };
        assert_eq!(err.exit_code(), 2);
        assert_eq!(KeepaliveError::Usage("x".into()).exit_code(), 1);
        assert_eq!(KeepaliveError::ConfigError("x".into()).exit_code(), 1);
    }
}
