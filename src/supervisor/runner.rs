// src/supervisor/runner.rs

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{Result, ToolrunError};
use crate::supervisor::invocation::{RunOutcome, ToolInvocation};
use crate::supervisor::sink::RunSink;
use crate::supervisor::token::CancelToken;

/// Terminal escape artifact some tools leave in their output; always
/// stripped before a line is forwarded.
const ANSI_RESET: &str = "\x1b[0m";

/// Notice emitted to the sink when a cancellation is honoured.
const TERMINATED_NOTICE: &str = "Tool operation terminated.";
const TERMINATED_SEPARATOR: &str = "------------------------------------";

/// Owns the lifecycle of at most one external tool process at a time.
///
/// `start` runs the whole lifecycle: enter the invocation's working
/// directory, spawn the child with stdout and stderr merged into one line
/// stream, pump lines to the sink until end of stream, cancellation or
/// error. Callers on a UI/event thread must dispatch `start` onto a worker
/// task; [`CancelToken::request`] may be called concurrently at any time.
///
/// Reaching end of stream without cancellation is `Completed` regardless of
/// the child's exit status. The status is logged but not consulted,
/// matching the behaviour of the tool wrappers this supervises.
#[derive(Default)]
pub struct Supervisor {
    active: AtomicBool,
}

impl Supervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one tool invocation to a terminal outcome.
    ///
    /// `Err(AlreadyRunning)` is the only error: every in-run failure is
    /// reported as `Ok(RunOutcome::Failed(detail))`, with the detail also
    /// delivered to the sink as a plain output line so it shows up in the
    /// same stream as normal tool output.
    pub async fn start(
        &self,
        invocation: &ToolInvocation,
        token: &CancelToken,
        sink: &mut dyn RunSink,
    ) -> Result<RunOutcome> {
        let _active = ActiveGuard::acquire(&self.active)?;
        token.clear();

        info!(tool = %invocation.name, "starting tool process");

        // Scoped process-wide working directory change; the guard restores
        // the original directory on every exit path below.
        let _workdir = match WorkdirGuard::enter(&invocation.working_dir) {
            Ok(guard) => guard,
            Err(err) => {
                let detail = format!(
                    "entering working directory {}: {}",
                    invocation.working_dir.display(),
                    err
                );
                sink.on_line(&detail);
                return Ok(RunOutcome::Failed(detail));
            }
        };

        let mut child = match invocation.to_command().spawn() {
            Ok(child) => child,
            Err(err) => {
                let detail =
                    format!("spawning process for tool '{}': {}", invocation.name, err);
                sink.on_line(&detail);
                return Ok(RunOutcome::Failed(detail));
            }
        };

        // Merge stdout and stderr into a single ordered line stream. Order
        // within each pipe is preserved; both pumps feed the same channel.
        let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
        spawn_line_pump(child.stdout.take(), line_tx.clone());
        spawn_line_pump(child.stderr.take(), line_tx);

        loop {
            tokio::select! {
                maybe_line = line_rx.recv() => {
                    let Some(line) = maybe_line else {
                        // End of stream: both pipes closed.
                        break;
                    };

                    let line = strip_escape_artifacts(&line);

                    // Cancellation is observed at line granularity: anything
                    // the child produced before the request was set has
                    // already been delivered.
                    if token.is_requested() {
                        return Ok(self.terminate(invocation, token, &mut child, sink).await);
                    }

                    sink.on_line(line.trim());
                }

                // Secondary path: a silent child that produces no further
                // lines is still killed promptly.
                _ = token.requested() => {
                    return Ok(self.terminate(invocation, token, &mut child, sink).await);
                }
            }
        }

        match child.wait().await {
            Ok(status) => {
                // Exit status is logged but does not gate the outcome.
                info!(
                    tool = %invocation.name,
                    exit_code = status.code().unwrap_or(-1),
                    success = status.success(),
                    "tool process exited"
                );
            }
            Err(err) => {
                warn!(tool = %invocation.name, error = %err, "failed to reap tool process");
            }
        }

        emit_banner(sink, &invocation.name);
        Ok(RunOutcome::Completed)
    }

    async fn terminate(
        &self,
        invocation: &ToolInvocation,
        token: &CancelToken,
        child: &mut Child,
        sink: &mut dyn RunSink,
    ) -> RunOutcome {
        token.clear();

        info!(tool = %invocation.name, "cancellation requested; killing tool process");
        if let Err(err) = child.kill().await {
            warn!(tool = %invocation.name, error = %err, "failed to kill tool process");
        }

        sink.on_line(TERMINATED_NOTICE);
        sink.on_line(TERMINATED_SEPARATOR);
        RunOutcome::Cancelled
    }
}

/// Strip known terminal-escape artifacts from a raw output line.
///
/// Policy: always strip; when debug logging is enabled the raw line is
/// surfaced there before stripping.
fn strip_escape_artifacts(line: &str) -> String {
    if line.contains(ANSI_RESET) {
        debug!(raw = %line, "stripping terminal escape artifact from tool output");
        line.replace(ANSI_RESET, "")
    } else {
        line.to_string()
    }
}

/// Three-line completion banner: separator, "<name> tool finished",
/// separator, with the separator sized to the message.
fn emit_banner(sink: &mut dyn RunSink, tool_name: &str) {
    let message = format!("{tool_name} tool finished");
    let separator = "-".repeat(message.len());
    sink.on_line(&separator);
    sink.on_line(&message);
    sink.on_line(&separator);
}

fn spawn_line_pump<R>(reader: Option<R>, tx: mpsc::UnboundedSender<String>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let Some(reader) = reader else {
        return;
    };

    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
}

/// Single-flight gate: a new run request while one is active is rejected,
/// never queued.
struct ActiveGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ActiveGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ToolrunError::AlreadyRunning)?;
        Ok(Self { flag })
    }
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Changes the process-wide working directory and restores the original on
/// drop. Not safe for concurrent runs from multiple supervisor instances in
/// the same process; the single-flight gate above covers one instance.
struct WorkdirGuard {
    original: PathBuf,
}

impl WorkdirGuard {
    fn enter(target: &Path) -> std::io::Result<Self> {
        let original = std::env::current_dir()?;
        std::env::set_current_dir(target)?;
        debug!(dir = %target.display(), "entered working directory");
        Ok(Self { original })
    }
}

impl Drop for WorkdirGuard {
    fn drop(&mut self) {
        if let Err(err) = std::env::set_current_dir(&self.original) {
            warn!(
                dir = %self.original.display(),
                error = %err,
                "failed to restore original working directory"
            );
        }
    }
}
