// src/process/mod.rs

//! Process layer.
//!
//! - [`backend`] defines the [`Launcher`] / [`ProcessHandle`] traits the
//!   supervisor talks to, so tests can plug in a fake launcher instead of
//!   spawning real processes.
//! - [`os`] is the production implementation on top of
//!   `tokio::process::Command`.
//! - [`slot`] holds the single supervised process handle.

pub mod backend;
pub mod os;
pub mod slot;

pub use backend::{Launcher, ProcessExit, ProcessHandle, StopFuture};
pub use os::{OsLauncher, OsProcess};
pub use slot::ProcessSlot;
