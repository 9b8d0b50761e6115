//! Per-user editor settings.
//!
//! Callers are identified by the host application's access-token cookie. With
//! authentication disabled everyone shares one global settings file; with it
//! enabled each user gets `user_<name>.json` and anonymous callers are
//! rejected.

mod identity;
mod store;

pub use identity::{
    access_token, authenticate, Identity, StaticTokens, TokenResolver, ACCESS_TOKEN_COOKIE,
    ACCESS_TOKEN_UNSECURE_COOKIE,
};
pub use store::SettingsStore;

use std::path::PathBuf;
use thiserror::Error;

/// Errors from identity resolution and settings persistence.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Authentication is enabled and the caller carries no valid token.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The resolved user name cannot be used as part of a file name.
    #[error("Invalid user name: {0:?}")]
    InvalidUser(String),

    /// Writing the settings file failed.
    #[error("Failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings document could not be serialized.
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}
