// src/supervisor/invocation.rs

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;

/// How one tool process is started.
///
/// Resolved once by the catalog layer; the supervisor consumes it uniformly
/// and never inspects tool kinds itself.
#[derive(Debug, Clone)]
pub enum ToolCommand {
    /// An interpreted tool, e.g. `python tools/centerline.py -i '{...}'`.
    Script {
        interpreter: String,
        script: PathBuf,
        args: Vec<String>,
    },

    /// A native tool binary invoked directly.
    NativeExecutable {
        program: PathBuf,
        args: Vec<String>,
    },
}

/// Value describing one supervised run. Built once per run request,
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    /// Display name used in the completion banner and in logs.
    pub name: String,
    pub command: ToolCommand,
    /// Directory the process-wide working directory is switched to for the
    /// duration of the run.
    pub working_dir: PathBuf,
}

impl ToolInvocation {
    pub fn script(
        name: impl Into<String>,
        interpreter: impl Into<String>,
        script: impl Into<PathBuf>,
        args: Vec<String>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            command: ToolCommand::Script {
                interpreter: interpreter.into(),
                script: script.into(),
                args,
            },
            working_dir: working_dir.into(),
        }
    }

    pub fn native(
        name: impl Into<String>,
        program: impl Into<PathBuf>,
        args: Vec<String>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            command: ToolCommand::NativeExecutable {
                program: program.into(),
                args,
            },
            working_dir: working_dir.into(),
        }
    }

    /// Build the `tokio::process::Command` for this invocation.
    ///
    /// stdout and stderr are both piped so the supervisor can merge them
    /// into a single line stream; the child is killed if the run future is
    /// dropped.
    pub(crate) fn to_command(&self) -> Command {
        let mut cmd = match &self.command {
            ToolCommand::Script {
                interpreter,
                script,
                args,
            } => {
                let mut c = Command::new(interpreter);
                c.arg(script).args(args);
                c
            }
            ToolCommand::NativeExecutable { program, args } => {
                let mut c = Command::new(program);
                c.args(args);
                c
            }
        };

        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        cmd
    }
}

/// The terminal result of one supervised run. Exactly one is produced per
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// End of output stream reached without cancellation. The child's exit
    /// status is not consulted; see the supervisor docs.
    Completed,

    /// The run could not be started or failed along the way; the detail
    /// string was also delivered to the sink as a plain line.
    Failed(String),

    /// The caller requested cancellation and the child was terminated.
    Cancelled,
}

impl RunOutcome {
    /// Process exit code the CLI front-end maps this outcome to:
    /// 0 completed, 1 failed, 2 cancelled.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Completed => 0,
            RunOutcome::Failed(_) => 1,
            RunOutcome::Cancelled => 2,
        }
    }
}
