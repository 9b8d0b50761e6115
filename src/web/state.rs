//! Application state for the web server.
//!
//! This module defines the shared state that is accessible from all request handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::settings::{SettingsStore, StaticTokens, TokenResolver};
use crate::snippets::SnippetRegistry;
use crate::staging::CsvStager;

/// Shared application state for the web server.
///
/// This state is cloned for each request handler, but the inner Arc types
/// ensure that the actual data is shared efficiently.
#[derive(Clone)]
pub struct AppState {
    /// Snippet cache, populated on first request
    pub snippets: Arc<SnippetRegistry>,
    /// Directory scanned for plugin snippets
    pub plugin_root: PathBuf,
    /// CSV staging for the autocomplete dictionaries
    pub csv: Arc<CsvStager>,
    /// Per-user settings files
    pub settings: Arc<SettingsStore>,
    /// Access token lookup for the settings endpoint
    pub tokens: Arc<dyn TokenResolver>,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the state for an extension rooted at `root`.
    pub fn new(config: Config, root: &Path) -> Self {
        let tokens = Arc::new(StaticTokens::new(config.auth.tokens.clone()));
        Self::with_resolver(config, root, tokens)
    }

    /// Like [`AppState::new`], with a custom token source.
    pub fn with_resolver(config: Config, root: &Path, tokens: Arc<dyn TokenResolver>) -> Self {
        Self {
            snippets: Arc::new(SnippetRegistry::new()),
            plugin_root: config.plugin_root(root),
            csv: Arc::new(CsvStager::new(
                config.csv_source_dir(root),
                config.served_dir(root),
            )),
            settings: Arc::new(SettingsStore::new(config.settings_dir(root))),
            tokens,
            config: Arc::new(config),
        }
    }
}
