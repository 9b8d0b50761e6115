//! `monaco-prompt snippets`: one-off scan of plugin snippets.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::snippets::SnippetRegistry;
use crate::Config;

pub async fn run(
    root: &Path,
    config: &Config,
    plugin_root: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let plugin_root = plugin_root.unwrap_or_else(|| config.plugin_root(root));

    let registry = SnippetRegistry::new();
    let scan_root = plugin_root.clone();
    let snippets = tokio::task::spawn_blocking(move || registry.load(&scan_root))
        .await
        .context("Snippet scan task failed")?;

    if json {
        let output = serde_json::to_string_pretty(snippets.as_slice())
            .context("Failed to serialize snippets")?;
        println!("{output}");
        return Ok(());
    }

    println!("Snippets under {}", plugin_root.display());
    println!("{}", "=".repeat(40));
    if snippets.is_empty() {
        println!("(none)");
    }
    for snippet in snippets.iter() {
        println!("{:<24} {}", snippet.label, snippet.path);
        if let Some(detail) = snippet.detail.as_ref().and_then(|d| d.as_str()) {
            println!("{:<24} {}", "", detail);
        }
    }
    println!("\nTotal: {}", snippets.len());

    Ok(())
}
