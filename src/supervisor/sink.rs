// src/supervisor/sink.rs

use tokio::sync::mpsc;

/// A parsed signal scraped from one raw output line.
///
/// Ephemeral: consumed immediately by the sink, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Percentage complete, already truncated and clamped to 0..=100.
    Percent(u8),
    /// A status label update; does not affect the numeric progress value.
    Label(String),
}

/// Caller-supplied capability receiving line and progress events from a run.
///
/// The supervisor makes no assumption about which thread or task ultimately
/// displays these; callers that need them on a particular execution context
/// (e.g. a UI thread) should use a channel-backed sink and marshal on the
/// receiving side.
pub trait RunSink: Send {
    fn on_line(&mut self, line: &str);
    fn on_progress(&mut self, event: ProgressEvent);
}

/// Event as delivered over a [`ChannelSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Line(String),
    Progress(ProgressEvent),
}

/// A [`RunSink`] that forwards every event over an unbounded channel,
/// preserving order. This is how a caller running the supervisor on a worker
/// task gets events back onto its own context.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<RunEvent>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<RunEvent>) -> Self {
        Self { tx }
    }
}

impl RunSink for ChannelSink {
    fn on_line(&mut self, line: &str) {
        // A closed receiver just means the caller stopped listening.
        let _ = self.tx.send(RunEvent::Line(line.to_string()));
    }

    fn on_progress(&mut self, event: ProgressEvent) {
        let _ = self.tx.send(RunEvent::Progress(event));
    }
}
