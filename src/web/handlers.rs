//! HTTP request handlers.
//!
//! Blocking file-system work (snippet scans, CSV copies) runs on the blocking
//! thread pool; settings I/O uses `tokio::fs`.

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::error::ApiError;
use super::state::AppState;
use crate::settings::authenticate;
use crate::snippets::SnippetSnapshot;

/// Result of a settings write.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSettingsResponse {
    /// Whether the settings were stored
    pub success: bool,
    /// Failure reason when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StoreSettingsResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    fn failed(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Version
    pub version: String,
}

/// Stage bundled CSV files and list the served ones.
///
/// GET {prefix}/csv
pub async fn list_csv(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let csv = Arc::clone(&state.csv);
    let files = tokio::task::spawn_blocking(move || csv.stage_and_list())
        .await
        .context("CSV staging task failed")??;

    Ok(Json(files))
}

/// Cached snippets, loading them on first use.
///
/// GET {prefix}/snippets
pub async fn snippets(State(state): State<AppState>) -> Result<Response, ApiError> {
    let registry = Arc::clone(&state.snippets);
    let root = state.plugin_root.clone();
    let snapshot = tokio::task::spawn_blocking(move || registry.get_or_load(&root))
        .await
        .context("Snippet load task failed")?;

    Ok(snippets_response(snapshot))
}

/// Rescan plugin snippets and return the fresh list.
///
/// GET|POST {prefix}/snippets/refresh
pub async fn refresh_snippets(State(state): State<AppState>) -> Result<Response, ApiError> {
    info!(root = %state.plugin_root.display(), "Refreshing snippets");

    let registry = Arc::clone(&state.snippets);
    let root = state.plugin_root.clone();
    let snapshot = tokio::task::spawn_blocking(move || registry.load(&root))
        .await
        .context("Snippet load task failed")?;

    Ok(snippets_response(snapshot))
}

fn snippets_response(snapshot: SnippetSnapshot) -> Response {
    Json(snapshot.as_slice()).into_response()
}

/// Settings for the calling identity, `{}` if none are stored.
///
/// GET {settings_path}
pub async fn get_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let identity = authenticate(state.config.auth.enabled, state.tokens.as_ref(), &headers)?;
    let settings = state.settings.read(&identity).await?;

    Ok(Json(settings))
}

/// Replace the settings of the calling identity.
///
/// The body must be JSON; parse and write failures are reported in the
/// response body rather than the status code.
///
/// POST {settings_path}
pub async fn store_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<StoreSettingsResponse>, ApiError> {
    let identity = authenticate(state.config.auth.enabled, state.tokens.as_ref(), &headers)?;
    state.settings.path_for(&identity)?;

    let settings: Value = match serde_json::from_slice(&body) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(identity = %identity, error = %e, "Rejected settings body");
            return Ok(Json(StoreSettingsResponse::failed(e)));
        }
    };

    match state.settings.write(&identity, &settings).await {
        Ok(()) => Ok(Json(StoreSettingsResponse::ok())),
        Err(e) => {
            warn!(identity = %identity, error = %e, "Failed to store settings");
            Ok(Json(StoreSettingsResponse::failed(e)))
        }
    }
}

/// Health check endpoint.
///
/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
