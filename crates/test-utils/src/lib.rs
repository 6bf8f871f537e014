//! Shared fixtures for the keepalive test binaries.

pub mod fake_launcher;
pub mod recording_console;

pub use fake_launcher::{FakeEvent, FakeLauncher, FakeProbe, FakeProcess, LaunchScript};
pub use recording_console::RecordingConsole;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Route `tracing` output through the test writer so it only shows for
/// failing tests. `KEEPALIVE_LOG` picks the filter (default `info`).
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("KEEPALIVE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

        fmt().with_env_filter(filter).with_test_writer().init();
    });
}

/// Await `f`, failing the test if it takes longer than ten seconds.
pub async fn with_timeout<F: Future>(f: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(10), f)
        .await
        .expect("supervised run did not finish within 10s")
}
