//! Process-wide snippet cache.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Instant;
use tracing::info;

use super::loader;
use super::Snippet;

/// Shared, immutable view of a loaded snippet list.
pub type SnippetSnapshot = Arc<Vec<Snippet>>;

/// Cached snippet list with explicit reload.
///
/// The cache starts out unloaded. [`load`](Self::load) rebuilds the whole list
/// and publishes it with a single swap, so readers see either the previous
/// list or the new one. Loads are serialized; the last one to finish is the
/// one readers observe afterwards.
#[derive(Debug, Default)]
pub struct SnippetRegistry {
    cache: RwLock<Option<SnippetSnapshot>>,
    load_lock: Mutex<()>,
}

impl SnippetRegistry {
    /// Create an unloaded registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snippets, or `None` if nothing has been loaded yet.
    pub fn get_cached(&self) -> Option<SnippetSnapshot> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rescan `root` and replace the cache, discarding the previous list.
    pub fn load(&self, root: &Path) -> SnippetSnapshot {
        let _guard = self.load_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.rebuild(root)
    }

    /// Return the cached list, loading from `root` first if still unloaded.
    pub fn get_or_load(&self, root: &Path) -> SnippetSnapshot {
        if let Some(snapshot) = self.get_cached() {
            return snapshot;
        }

        let _guard = self.load_lock.lock().unwrap_or_else(PoisonError::into_inner);
        // Another caller may have finished loading while we waited.
        if let Some(snapshot) = self.get_cached() {
            return snapshot;
        }
        self.rebuild(root)
    }

    /// Caller must hold `load_lock`.
    fn rebuild(&self, root: &Path) -> SnippetSnapshot {
        let start = Instant::now();
        let snapshot: SnippetSnapshot = Arc::new(loader::scan(root).snippets);

        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&snapshot));

        info!(
            root = %root.display(),
            snippets = snapshot.len(),
            took_ms = start.elapsed().as_millis() as u64,
            "Snippets loaded"
        );

        snapshot
    }
}
