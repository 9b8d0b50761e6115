//! `monaco-prompt serve`: run the HTTP server.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::web::{AppState, WebServer};
use crate::Config;

/// Run the server, letting CLI flags override the configured address.
pub async fn run(
    root: &Path,
    config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    config.server.validate()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let state = AppState::new(config, root);
    info!(
        plugin_root = %state.plugin_root.display(),
        served_dir = %state.csv.served_dir().display(),
        settings_dir = %state.settings.dir().display(),
        auth = state.config.auth.enabled,
        "Starting server"
    );

    WebServer::new(state).start(&host, port).await
}
