// src/catalog/model.rs

use serde::Deserialize;

/// Top-level tool catalog as read from a JSON file.
///
/// This is a direct mapping of the catalog shipped next to the tool suite:
///
/// ```json
/// {
///   "toolbox": [
///     {
///       "category": "Forest Line Analysis",
///       "tools": [
///         { "name": "Centerline", "tool_api": "centerline", "tool_type": "python" }
///       ]
///     }
///   ]
/// }
/// ```
///
/// Only the fields needed for resolution are modelled; per-tool parameter
/// descriptors are GUI-form material and are ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCatalog {
    #[serde(default)]
    pub toolbox: Vec<Toolbox>,
}

/// One `toolbox` entry: a category name plus its tools.
#[derive(Debug, Clone, Deserialize)]
pub struct Toolbox {
    pub category: String,
    #[serde(default)]
    pub tools: Vec<ToolEntry>,
}

/// One tool definition inside a toolbox.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolEntry {
    /// Display name, e.g. `"Centerline"`.
    pub name: String,

    /// Logical api id the tool is invoked by, e.g. `"centerline"`. For
    /// script tools this is also the script file stem.
    pub tool_api: String,

    /// `"python"` or `"executable"`.
    pub tool_type: ToolKind,

    /// Short help text shown by `--list`.
    #[serde(default)]
    pub info: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Python,
    Executable,
}

impl ToolCatalog {
    /// Look a tool up by display name or api id.
    pub fn find(&self, ident: &str) -> Option<&ToolEntry> {
        self.toolbox
            .iter()
            .flat_map(|tb| tb.tools.iter())
            .find(|tool| tool.name == ident || tool.tool_api == ident)
    }

    /// All tools grouped by toolbox category, for listings.
    pub fn by_category(&self) -> impl Iterator<Item = (&str, &[ToolEntry])> {
        self.toolbox
            .iter()
            .map(|tb| (tb.category.as_str(), tb.tools.as_slice()))
    }

    pub fn tool_count(&self) -> usize {
        self.toolbox.iter().map(|tb| tb.tools.len()).sum()
    }
}
