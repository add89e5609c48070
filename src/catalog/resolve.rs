// src/catalog/resolve.rs

use std::path::PathBuf;

use tracing::debug;

use crate::catalog::model::{ToolCatalog, ToolKind};
use crate::errors::{Result, ToolrunError};
use crate::supervisor::ToolInvocation;

/// Caller-side settings folded into every resolved invocation.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Directory the run switches into for the duration of the process.
    pub working_dir: PathBuf,

    /// Directory holding the tool scripts/binaries, relative paths resolved
    /// against `working_dir`.
    pub tools_dir: PathBuf,

    /// Processes cap handed to tools via `-p`; `-1` means "let the tool
    /// decide".
    pub max_procs: i32,

    /// Whether tools should print verbose feedback (`-v`).
    pub verbose: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            tools_dir: PathBuf::from("tools"),
            max_procs: -1,
            verbose: false,
        }
    }
}

/// Map a logical tool identifier plus a JSON argument blob to a concrete
/// [`ToolInvocation`].
///
/// Script tools follow the suite's argument convention: the whole parameter
/// mapping is passed as one JSON string via `-i`, the processes cap via `-p`
/// and the verbose flag via `-v`. Native tools receive the JSON blob as
/// their single argument.
///
/// The identifier may be either the display name or the api id; an unknown
/// identifier is an error. Tool existence on disk is not checked here; a
/// missing script surfaces as a spawn failure at run time.
pub fn resolve_invocation(
    catalog: &ToolCatalog,
    ident: &str,
    args: &serde_json::Value,
    opts: &ResolveOptions,
) -> Result<ToolInvocation> {
    let tool = catalog
        .find(ident)
        .ok_or_else(|| ToolrunError::UnknownTool(ident.to_string()))?;

    let args_string = args.to_string();

    let invocation = match tool.tool_type {
        ToolKind::Python => ToolInvocation::script(
            &tool.name,
            "python",
            opts.tools_dir.join(format!("{}.py", tool.tool_api)),
            vec![
                "-i".to_string(),
                args_string,
                "-p".to_string(),
                opts.max_procs.to_string(),
                "-v".to_string(),
                opts.verbose.to_string(),
            ],
            &opts.working_dir,
        ),
        ToolKind::Executable => ToolInvocation::native(
            &tool.name,
            opts.tools_dir.join(&tool.tool_api),
            vec![args_string],
            &opts.working_dir,
        ),
    };

    debug!(tool = %tool.name, api = %tool.tool_api, "resolved tool invocation");
    Ok(invocation)
}
