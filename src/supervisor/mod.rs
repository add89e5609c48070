// src/supervisor/mod.rs

//! Tool process supervision.
//!
//! Responsibilities:
//! - Describe how a tool process is started (`invocation.rs`).
//! - Own the process lifecycle: spawn, pump output lines, honour
//!   cancellation, produce exactly one terminal outcome (`runner.rs`).
//! - Per-run cooperative cancellation token (`token.rs`).
//! - Sink capability the caller supplies to receive events (`sink.rs`).
//! - Scraping of in-band progress markers, layered between the supervisor
//!   and the display sink (`progress.rs`).

pub mod invocation;
pub mod progress;
pub mod runner;
pub mod sink;
pub mod token;

pub use invocation::{RunOutcome, ToolCommand, ToolInvocation};
pub use progress::{LABEL_MARKER, ProgressScanner};
pub use runner::Supervisor;
pub use sink::{ChannelSink, ProgressEvent, RunEvent, RunSink};
pub use token::CancelToken;
