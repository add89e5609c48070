#![allow(dead_code)]

use std::future::Future;
use std::sync::{Mutex, MutexGuard, Once};
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use toolrun::supervisor::{ProgressEvent, RunSink};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Guard against hung children stalling the whole suite.
pub async fn with_timeout<F, T>(fut: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(30), fut)
        .await
        .expect("test timed out after 30s")
}

static RUN_LOCK: Mutex<()> = Mutex::new(());

/// Every supervised run mutates the process-wide working directory, so
/// tests that call `Supervisor::start` in the same test binary must not
/// overlap.
pub fn run_lock() -> MutexGuard<'static, ()> {
    RUN_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// A sink that records everything it receives, in order.
#[derive(Default)]
pub struct RecordingSink {
    pub lines: Vec<String>,
    pub events: Vec<ProgressEvent>,
}

impl RunSink for RecordingSink {
    fn on_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn on_progress(&mut self, event: ProgressEvent) {
        self.events.push(event);
    }
}
