//! HTTP front end for the prompt editor.
//!
//! Serves:
//! - the staged CSV autocomplete dictionaries and their listing
//! - plugin snippets, with an explicit refresh endpoint
//! - per-user editor settings
//!
//! # Example
//!
//! ```rust,ignore
//! use monaco_prompt::web::{AppState, WebServer};
//!
//! let server = WebServer::new(AppState::new(config, &root));
//! server.start("127.0.0.1", 8189).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

use anyhow::{Context, Result};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Web server for the editor assets.
pub struct WebServer {
    /// Shared application state
    state: AppState,
}

impl WebServer {
    /// Create a new web server with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Start the web server on `host:port`.
    ///
    /// This method blocks until the server is shut down.
    pub async fn start(self, host: &str, port: u16) -> Result<()> {
        let addr = format!("{host}:{port}");

        // The editor page is served by the host application on another origin.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = routes::create_router(self.state).layer(cors);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind to {}", addr))?;

        info!("Serving editor assets at http://{}", addr);

        axum::serve(listener, app)
            .await
            .with_context(|| "Web server failed")?;

        Ok(())
    }
}
