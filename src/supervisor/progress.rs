// src/supervisor/progress.rs

//! Best-effort scraping of in-band progress markers from tool output.
//!
//! Tools report status inside otherwise unstructured text, using two
//! conventions:
//! - a percentage somewhere in the line, e.g. `Total complete: 42%`
//! - a label marker, e.g. `PROGRESS_LABEL "Computing footprint"`
//!
//! This is text scraping, not a validated protocol: a line that looks like
//! progress but fails to parse is logged and forwarded untouched. Extraction
//! happens between the supervisor and the display sink, never inside the
//! supervisor's read loop.

use regex::Regex;
use tracing::debug;

use crate::supervisor::sink::{ProgressEvent, RunSink};

/// Marker token tools print to update the status label.
pub const LABEL_MARKER: &str = "PROGRESS_LABEL";

/// Permissive match for the numeric run preceding and including `%`.
const PERCENT_PATTERN: &str = r"([-+]?\d+(?:\.\d+)?)\s*%";

/// Sink adapter that scrapes progress markers out of forwarded lines.
///
/// For each line, at most one of {percent, label} is extracted (percent
/// wins); the matched substring is removed and any remaining displayable
/// text is still forwarded as a normal line to the inner sink.
pub struct ProgressScanner<S> {
    inner: S,
    percent_re: Regex,
}

impl<S: RunSink> ProgressScanner<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            percent_re: Regex::new(PERCENT_PATTERN).expect("percent pattern is valid"),
        }
    }

    /// Consume the scanner and return the inner sink.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn extract_percent(&self, line: &str) -> Option<(u8, String)> {
        let caps = self.percent_re.captures(line)?;
        let whole = caps.get(0)?;
        let value: f64 = caps.get(1)?.as_str().trim().parse().ok()?;
        // Truncate, then clamp into the displayable range.
        let value = (value as i64).clamp(0, 100) as u8;

        let rest = format!("{}{}", &line[..whole.start()], &line[whole.end()..])
            .trim()
            .to_string();

        Some((value, rest))
    }
}

impl<S: RunSink> RunSink for ProgressScanner<S> {
    fn on_line(&mut self, line: &str) {
        if line.contains('%') {
            match self.extract_percent(line) {
                Some((value, rest)) => {
                    self.inner.on_progress(ProgressEvent::Percent(value));
                    if !rest.is_empty() {
                        self.inner.on_line(&rest);
                    }
                }
                None => {
                    debug!(line = %line, "percent marker present but not parseable");
                    self.inner.on_line(line);
                }
            }
            return;
        }

        if let Some(idx) = line.find(LABEL_MARKER) {
            let label = line[idx + LABEL_MARKER.len()..]
                .replace('"', "")
                .trim()
                .to_string();
            let rest = line[..idx].trim().to_string();

            self.inner.on_progress(ProgressEvent::Label(label));
            if !rest.is_empty() {
                self.inner.on_line(&rest);
            }
            return;
        }

        self.inner.on_line(line);
    }

    fn on_progress(&mut self, event: ProgressEvent) {
        self.inner.on_progress(event);
    }
}
