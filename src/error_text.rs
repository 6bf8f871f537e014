// src/error_text.rs

//! Human-readable text for platform error codes.
//!
//! The standard library already knows how to ask the OS for an error
//! description (`strerror_r` on Unix, `FormatMessageW` on Windows) and owns
//! the buffers involved. We only strip the `(os error N)` suffix it appends
//! and substitute a marked fallback when the OS has nothing to say.

use std::io;

/// Prefixes the OS uses when it has no description for a code.
const UNKNOWN_PREFIXES: &[&str] = &[
    "Unknown error",
    "Unknown system error",
    "No error information",
    "OS Error",
];

/// Look up the OS description for `code`.
///
/// Always returns something displayable.
pub fn format_os_error(code: i32) -> String {
    let full = io::Error::from_raw_os_error(code).to_string();
    let suffix = format!("(os error {code})");

    let description = full
        .strip_suffix(suffix.as_str())
        .unwrap_or(full.as_str())
        .trim();

    if description.is_empty() || UNKNOWN_PREFIXES.iter().any(|p| description.starts_with(p)) {
        return fallback_text(code);
    }

    description.to_string()
}

/// Describe an I/O error for the operator.
///
/// Errors carrying an OS code go through [`format_os_error`]; synthetic
/// errors (no OS code) use their own message.
pub fn describe_io_error(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(code) => format_os_error(code),
        None => err.to_string(),
    }
}

fn fallback_text(code: i32) -> String {
    format!("undefined error description ({code})")
}
