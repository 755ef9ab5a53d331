//! Write-once, lazily initialized access to the loaded catalog.
//!
//! The handle is owned by whoever serves requests (the server state, the
//! CLI) and cloned into them; there is no process-wide static. The first
//! successful [`CatalogHandle::get`] deserializes the artifacts, every
//! later call returns the same `Arc`. A failed load leaves the handle
//! empty so a later call can try again.

use crate::error::Result;
use crate::types::CatalogStore;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CatalogHandle {
    inner: Arc<HandleInner>,
}

#[derive(Debug)]
struct HandleInner {
    data_dir: PathBuf,
    store: OnceLock<Arc<CatalogStore>>,
    /// Serializes first loads so two callers never deserialize twice
    init_lock: Mutex<()>,
}

impl CatalogHandle {
    /// Create an empty handle; nothing is read until the first `get`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                data_dir: data_dir.into(),
                store: OnceLock::new(),
                init_lock: Mutex::new(()),
            }),
        }
    }

    /// Create a handle around an already-built store
    pub fn from_store(store: CatalogStore) -> Self {
        let handle = Self::new(PathBuf::new());
        // freshly created, cannot already be set
        let _ = handle.inner.store.set(Arc::new(store));
        handle
    }

    /// Return the loaded store, loading it on first use
    pub fn get(&self) -> Result<Arc<CatalogStore>> {
        if let Some(store) = self.inner.store.get() {
            return Ok(Arc::clone(store));
        }

        // A poisoned lock only means another loader panicked; the cell is
        // still consistent, so carry on.
        let _guard = self
            .inner
            .init_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(store) = self.inner.store.get() {
            debug!("Catalog loaded by a concurrent caller");
            return Ok(Arc::clone(store));
        }

        let store = Arc::new(CatalogStore::load_from_files(&self.inner.data_dir)?);
        Ok(Arc::clone(self.inner.store.get_or_init(|| store)))
    }

    /// Whether the artifacts have been loaded yet
    pub fn is_loaded(&self) -> bool {
        self.inner.store.get().is_some()
    }

    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataLoadError;
    use crate::parser::{MOVIES_FILE, SIMILARITY_FILE};
    use crate::types::MovieRecord;
    use std::fs;
    use tempfile::TempDir;

    fn write_small_catalog(dir: &Path) {
        fs::write(
            dir.join(MOVIES_FILE),
            r#"{"movie_id": [1, 2], "title": ["Up", "Cars"]}"#,
        )
        .unwrap();
        fs::write(dir.join(SIMILARITY_FILE), "[[1.0, 0.3], [0.3, 1.0]]").unwrap();
    }

    #[test]
    fn test_loads_once_and_shares() {
        let dir = TempDir::new().unwrap();
        write_small_catalog(dir.path());
        let handle = CatalogHandle::new(dir.path());
        assert!(!handle.is_loaded());

        let first = handle.get().unwrap();
        // Removing the files proves the second call does not hit the disk
        fs::remove_file(dir.path().join(MOVIES_FILE)).unwrap();
        let second = handle.clone().get().unwrap();

        assert!(handle.is_loaded());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_failed_load_can_retry() {
        let dir = TempDir::new().unwrap();
        let handle = CatalogHandle::new(dir.path());

        let err = handle.get().unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
        assert!(!handle.is_loaded());

        write_small_catalog(dir.path());
        assert_eq!(handle.get().unwrap().index_of("Cars"), Some(1));
    }

    #[test]
    fn test_from_store() {
        let store = CatalogStore::try_new(
            vec![MovieRecord::new(7, "Heat")],
            vec![vec![1.0]],
        )
        .unwrap();

        let handle = CatalogHandle::from_store(store);
        assert!(handle.is_loaded());
        assert_eq!(handle.get().unwrap().get(0).unwrap().id, 7);
    }
}
