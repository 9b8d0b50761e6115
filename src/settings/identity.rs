//! Caller identity from access-token cookies.

use axum::http::{header, HeaderMap};
use std::collections::HashMap;
use std::fmt;

use super::SettingsError;

/// Cookie set by the host for HTTPS sessions.
pub const ACCESS_TOKEN_COOKIE: &str = "access-token";
/// Cookie set by the host for plain HTTP sessions.
pub const ACCESS_TOKEN_UNSECURE_COOKIE: &str = "access-token-unsecure";

/// Whose settings a request reads or writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Authentication disabled: one shared settings file.
    Global,
    /// An authenticated user.
    User(String),
}

impl Identity {
    /// File name of this identity's settings document.
    pub fn file_name(&self) -> Result<String, SettingsError> {
        match self {
            Identity::Global => Ok("global.json".to_string()),
            Identity::User(name) => {
                if name.is_empty()
                    || name == "."
                    || name.contains("..")
                    || name.contains(['/', '\\', '\0'])
                {
                    return Err(SettingsError::InvalidUser(name.clone()));
                }
                Ok(format!("user_{name}.json"))
            }
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Global => write!(f, "global"),
            Identity::User(name) => write!(f, "user:{name}"),
        }
    }
}

/// Maps access tokens to user names.
///
/// The host application issues tokens; this service only looks them up.
pub trait TokenResolver: Send + Sync {
    fn resolve(&self, token: &str) -> Option<String>;
}

/// Token table loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticTokens {
    tokens: HashMap<String, String>,
}

impl StaticTokens {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

impl TokenResolver for StaticTokens {
    fn resolve(&self, token: &str) -> Option<String> {
        self.tokens.get(token).cloned()
    }
}

/// Extract the access token from the request cookies.
///
/// The secure cookie wins; the unsecure one is used when the secure cookie is
/// missing or empty.
pub fn access_token(headers: &HeaderMap) -> Option<String> {
    let cookies: Vec<(&str, &str)> = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .map(|(name, value)| (name.trim(), value.trim()))
        .collect();

    [ACCESS_TOKEN_COOKIE, ACCESS_TOKEN_UNSECURE_COOKIE]
        .iter()
        .find_map(|wanted| {
            cookies
                .iter()
                .find(|(name, value)| name == wanted && !value.is_empty())
                .map(|(_, value)| value.to_string())
        })
}

/// Resolve the identity a request acts as.
pub fn authenticate(
    auth_enabled: bool,
    resolver: &dyn TokenResolver,
    headers: &HeaderMap,
) -> Result<Identity, SettingsError> {
    if !auth_enabled {
        return Ok(Identity::Global);
    }

    access_token(headers)
        .and_then(|token| resolver.resolve(&token))
        .map(Identity::User)
        .ok_or(SettingsError::Unauthenticated)
}
