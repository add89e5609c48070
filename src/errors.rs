// src/errors.rs

//! Crate-wide error types and aliases.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolrunError {
    /// A `start` call arrived while another tool process was active on the
    /// same supervisor. The caller may retry once the current run ends.
    #[error("a tool process is already running")]
    AlreadyRunning,

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("catalog parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ToolrunError>;
