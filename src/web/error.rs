//! Mapping of handler failures to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::settings::SettingsError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Same body shape the host framework uses for auth failures.
            ApiError::Settings(SettingsError::Unauthenticated) => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "detail": "Not authenticated" })),
            )
                .into_response(),
            ApiError::Settings(e @ SettingsError::InvalidUser(_)) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response(),
            other => {
                error!(error = %other, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": other.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
