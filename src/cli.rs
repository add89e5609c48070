// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `toolrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "toolrun",
    version,
    about = "Run a geospatial analysis tool and stream its output and progress.",
    long_about = None
)]
pub struct CliArgs {
    /// Tool to run: display name or api id from the catalog.
    ///
    /// Optional only when `--list` is given.
    pub tool: Option<String>,

    /// Tool parameters as a single JSON object.
    #[arg(long, value_name = "JSON", default_value = "{}")]
    pub args: String,

    /// Path to the tool catalog (JSON).
    ///
    /// Default: `tools.json` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "tools.json")]
    pub catalog: PathBuf,

    /// Working directory the tool process runs in.
    ///
    /// Default: the current working directory.
    #[arg(long, value_name = "PATH")]
    pub working_dir: Option<PathBuf>,

    /// Directory holding the tool scripts/binaries.
    #[arg(long, value_name = "PATH", default_value = "tools")]
    pub tools_dir: PathBuf,

    /// Processes cap passed to tools via `-p`; -1 lets the tool decide.
    #[arg(long, value_name = "N", default_value_t = -1, allow_negative_numbers = true)]
    pub max_procs: i32,

    /// Ask tools for verbose feedback.
    #[arg(long)]
    pub verbose: bool,

    /// List the tools in the catalog, grouped by toolbox, and exit.
    #[arg(long)]
    pub list: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TOOLRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
