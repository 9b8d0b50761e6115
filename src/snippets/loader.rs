//! Snippet file discovery and parsing.

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::Snippet;

/// Name of the per-plugin directory holding snippet files.
pub const SNIPPETS_DIR: &str = "snippets";

const SNIPPET_EXTENSION: &str = "json";

/// Reasons a whole snippet file is skipped.
#[derive(Error, Debug)]
pub enum SnippetFileError {
    /// The file could not be read (permissions, encoding, vanished).
    #[error("failed to read snippet file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid JSON.
    #[error("invalid json in snippet file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Shape a candidate must match to become a [`Snippet`].
///
/// Missing or non-string `label`/`insertText` fail deserialization, which
/// discards the candidate. A `null` detail or documentation counts as absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnippetEntry {
    label: String,
    insert_text: String,
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    documentation: Option<Value>,
}

impl SnippetEntry {
    fn into_snippet(self, path: String) -> Snippet {
        Snippet {
            label: self.label,
            insert_text: self.insert_text,
            path,
            detail: self.detail,
            documentation: self.documentation,
        }
    }
}

/// Find every `<root>/<plugin>/snippets/*.json` file.
///
/// Plugins and files are visited in file-name order. Dot-prefixed entries are
/// skipped at both levels. A missing or unreadable root yields nothing.
pub fn discover_snippet_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for plugin in list_dir(root).filter(|entry| entry.file_type().is_dir()) {
        let snippets_dir = plugin.path().join(SNIPPETS_DIR);
        if !snippets_dir.is_dir() {
            continue;
        }

        files.extend(
            list_dir(&snippets_dir)
                .filter(|entry| entry.file_type().is_file())
                .filter(|entry| {
                    entry.path().extension().and_then(|ext| ext.to_str())
                        == Some(SNIPPET_EXTENSION)
                })
                .map(DirEntry::into_path),
        );
    }

    files
}

/// Parse one snippet file into its valid entries.
///
/// `path` in each snippet is computed relative to `root`.
pub fn parse_snippet_file(root: &Path, file: &Path) -> Result<Vec<Snippet>, SnippetFileError> {
    let content = fs::read_to_string(file).map_err(|source| SnippetFileError::Read {
        path: file.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| SnippetFileError::Parse {
        path: file.to_path_buf(),
        source,
    })?;

    let candidates = match value {
        Value::Array(items) => items,
        single => vec![single],
    };

    let relative = relative_path(root, file);

    Ok(candidates
        .into_iter()
        .filter_map(|candidate| serde_json::from_value::<SnippetEntry>(candidate).ok())
        .map(|entry| entry.into_snippet(relative.clone()))
        .collect())
}

/// Result of scanning a plugin root.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Valid snippets in discovery order
    pub snippets: Vec<Snippet>,
    /// Files left out of the scan, one error per file
    pub skipped: Vec<SnippetFileError>,
}

/// Scan `root` and collect every valid snippet.
///
/// Broken files are logged at `warn` and reported in
/// [`ScanOutcome::skipped`]; they never stop the scan.
pub fn scan(root: &Path) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();

    for file in discover_snippet_files(root) {
        match parse_snippet_file(root, &file) {
            Ok(parsed) => {
                debug!(path = %file.display(), count = parsed.len(), "Loaded snippet file");
                outcome.snippets.extend(parsed);
            }
            Err(e) => {
                warn!(path = %file.display(), error = %e, "[SKIP] invalid snippet file");
                outcome.skipped.push(e);
            }
        }
    }

    outcome
}

fn list_dir(dir: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!(error = %e, "Skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
}

/// Root-relative path with `/` separators on every platform.
fn relative_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
