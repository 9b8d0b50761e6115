//! JSON settings files keyed by identity.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::fs;
use tracing::{debug, warn};

use super::identity::Identity;
use super::SettingsError;

/// Reads and writes one settings document per identity.
///
/// Writes to the same identity are serialized; different identities write
/// independently.
#[derive(Debug)]
pub struct SettingsStore {
    dir: PathBuf,
    locks: Mutex<HashMap<Identity, Arc<tokio::sync::Mutex<()>>>>,
}

impl SettingsStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the settings file for `identity`.
    pub fn path_for(&self, identity: &Identity) -> Result<PathBuf, SettingsError> {
        Ok(self.dir.join(identity.file_name()?))
    }

    /// Load the settings document, or `{}` when missing or unreadable.
    pub async fn read(&self, identity: &Identity) -> Result<Value, SettingsError> {
        let path = self.path_for(identity)?;

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(identity = %identity, "No settings file yet");
                return Ok(empty());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Can't read settings file");
                return Ok(empty());
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Can't load settings JSON");
                Ok(empty())
            }
        }
    }

    /// Replace the settings document for `identity`.
    ///
    /// The document is written to a temp file and renamed into place.
    pub async fn write(&self, identity: &Identity, settings: &Value) -> Result<(), SettingsError> {
        let path = self.path_for(identity)?;
        let content = serde_json::to_vec(settings)?;

        let lock = self.lock_for(identity);
        let _guard = lock.lock().await;

        let io_err = |source: std::io::Error| SettingsError::Write {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).await.map_err(io_err)?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &content).await.map_err(io_err)?;
        fs::rename(&temp_path, &path).await.map_err(io_err)?;

        debug!(identity = %identity, path = %path.display(), "Saved settings");
        Ok(())
    }

    fn lock_for(&self, identity: &Identity) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(identity.clone()).or_default())
    }
}

fn empty() -> Value {
    Value::Object(Map::new())
}
