//! Route definitions for the web server.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::services::ServeDir;

use super::handlers;
use super::state::AppState;

/// Create the main router with all routes.
///
/// Route paths come from `state.config.server`; the static mount serves the
/// CSV staging directory.
pub fn create_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    let server = &config.server;
    let prefix = server.route_prefix.trim_end_matches('/');

    Router::new()
        // Editor assets
        .route(&format!("{prefix}/csv"), get(handlers::list_csv))
        .route(&format!("{prefix}/snippets"), get(handlers::snippets))
        .route(
            &format!("{prefix}/snippets/refresh"),
            get(handlers::refresh_snippets).post(handlers::refresh_snippets),
        )
        // Per-user settings
        .route(
            &server.settings_path,
            get(handlers::get_settings).post(handlers::store_settings),
        )
        .nest_service(
            server.static_mount.trim_end_matches('/'),
            ServeDir::new(state.csv.served_dir()),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
}
