//! Snippet discovery and caching.
//!
//! Plugins ship autocomplete snippets as JSON files under
//! `<plugin_root>/<plugin>/snippets/*.json`. Each file holds either a single
//! snippet object or an array of them. The [`SnippetRegistry`] scans those
//! files, keeps the entries that carry a string `label` and `insertText`, and
//! caches the result until it is explicitly reloaded.
//!
//! # Example
//!
//! ```rust,ignore
//! use monaco_prompt::snippets::SnippetRegistry;
//!
//! let registry = SnippetRegistry::new();
//! assert!(registry.get_cached().is_none());
//!
//! let snippets = registry.load(&plugin_root);
//! println!("{} snippets", snippets.len());
//! ```

mod loader;
mod registry;

pub use loader::{
    discover_snippet_files, parse_snippet_file, scan, ScanOutcome, SnippetFileError, SNIPPETS_DIR,
};
pub use registry::{SnippetRegistry, SnippetSnapshot};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single autocomplete entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Display name of the entry
    pub label: String,
    /// Text inserted when the entry is chosen
    pub insert_text: String,
    /// Source file, relative to the scanned plugin root
    pub path: String,
    /// Short description shown next to the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
    /// Long-form description (plain string or markdown object)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Value>,
}
