// src/lib.rs

pub mod catalog;
pub mod cli;
pub mod errors;
pub mod logging;
pub mod supervisor;

use anyhow::{Context, Result, anyhow};
use tokio::sync::mpsc;
use tracing::info;

use crate::catalog::{ResolveOptions, ToolCatalog, resolve_invocation};
use crate::cli::CliArgs;
use crate::supervisor::{
    CancelToken, ChannelSink, ProgressEvent, ProgressScanner, RunEvent, RunOutcome, Supervisor,
};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - catalog loading and tool resolution
/// - the supervisor, running on its own worker task
/// - a channel sink marshalling line/progress events back to this task
/// - Ctrl-C handling (maps to a cancellation request)
///
/// The returned outcome maps to the process exit code: 0 completed,
/// 1 failed, 2 cancelled.
pub async fn run(args: CliArgs) -> Result<RunOutcome> {
    let catalog = catalog::load_from_path(&args.catalog)?;

    if args.list {
        print_tool_list(&catalog);
        return Ok(RunOutcome::Completed);
    }

    let tool = args
        .tool
        .as_deref()
        .ok_or_else(|| anyhow!("no tool specified (use --list to see the catalog)"))?;

    let tool_args: serde_json::Value =
        serde_json::from_str(&args.args).context("parsing --args as a JSON object")?;

    let opts = ResolveOptions {
        working_dir: args
            .working_dir
            .clone()
            .unwrap_or_else(|| std::path::PathBuf::from(".")),
        tools_dir: args.tools_dir.clone(),
        max_procs: args.max_procs,
        verbose: args.verbose,
    };
    let invocation = resolve_invocation(&catalog, tool, &tool_args, &opts)?;

    let token = CancelToken::new();

    // Ctrl-C → cancel the running tool.
    {
        let token = token.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            token.request();
        });
    }

    // The supervisor's read loop blocks its task for the whole run, so it
    // gets a worker task of its own; events come back over the channel.
    let (tx, mut rx) = mpsc::unbounded_channel::<RunEvent>();
    let worker = {
        let token = token.clone();
        tokio::spawn(async move {
            let supervisor = Supervisor::new();
            let mut sink = ProgressScanner::new(ChannelSink::new(tx));
            supervisor.start(&invocation, &token, &mut sink).await
        })
    };

    while let Some(event) = rx.recv().await {
        match event {
            RunEvent::Line(line) => println!("{line}"),
            RunEvent::Progress(ProgressEvent::Percent(pc)) => {
                info!(percent = pc, "tool progress");
            }
            RunEvent::Progress(ProgressEvent::Label(label)) => {
                info!(label = %label, "tool progress");
            }
        }
    }

    let outcome = worker.await.context("joining supervisor worker task")??;
    Ok(outcome)
}

/// `--list` output: tools grouped by toolbox category.
fn print_tool_list(catalog: &ToolCatalog) {
    println!("available tools ({}):", catalog.tool_count());
    for (category, tools) in catalog.by_category() {
        println!("  {category}");
        for tool in tools {
            match &tool.info {
                Some(info) => println!("    - {} ({}): {}", tool.name, tool.tool_api, info),
                None => println!("    - {} ({})", tool.name, tool.tool_api),
            }
        }
    }
}
