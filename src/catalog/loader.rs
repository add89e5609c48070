// src/catalog/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::catalog::model::ToolCatalog;

/// Load a tool catalog from a JSON file.
///
/// This only performs deserialization; the catalog is trusted as-is and no
/// semantic validation of tool definitions is attempted.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ToolCatalog> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading tool catalog at {:?}", path))?;

    let catalog: ToolCatalog = serde_json::from_str(&contents)
        .with_context(|| format!("parsing JSON tool catalog from {:?}", path))?;

    debug!(
        toolboxes = catalog.toolbox.len(),
        tools = catalog.tool_count(),
        "loaded tool catalog"
    );

    Ok(catalog)
}

/// Default catalog path: `tools.json` in the current working directory.
pub fn default_catalog_path() -> PathBuf {
    PathBuf::from("tools.json")
}
