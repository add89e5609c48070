// src/catalog/mod.rs

//! Tool catalog: the lookup collaborator that maps logical tool names to
//! concrete invocations.
//!
//! Responsibilities:
//! - JSON-backed data model of the shipped catalog (`model.rs`).
//! - Loading the catalog file from disk (`loader.rs`).
//! - Resolving an identifier + argument blob to a `ToolInvocation`
//!   (`resolve.rs`).
//!
//! The supervisor trusts resolution fully; nothing here validates that the
//! resolved script or binary actually exists.

pub mod loader;
pub mod model;
pub mod resolve;

pub use loader::{default_catalog_path, load_from_path};
pub use model::{ToolCatalog, ToolEntry, ToolKind, Toolbox};
pub use resolve::{ResolveOptions, resolve_invocation};
