//! Shared, swappable registry snapshot.
//!
//! The store owns exactly one reference to the current [`RuleRegistry`].
//! Readers clone the `Arc` and keep using their snapshot for as long as
//! they like; a reload builds a complete new registry first and only then
//! swaps the reference. A failed reload leaves the old snapshot in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use steer_settings::SteerSettings;
use tracing::{info, warn};

use crate::errors::LoadError;
use crate::loader::{LoadOptions, resolve_source_dir};
use crate::registry::RuleRegistry;
use crate::types::RuleDocument;

/// Owner of the current rule snapshot for one directory.
#[derive(Debug)]
pub struct RuleStore {
    root: PathBuf,
    options: LoadOptions,
    current: RwLock<Option<Arc<RuleRegistry>>>,
    /// Serializes reloads so an older load never overwrites a newer one.
    reload_lock: Mutex<()>,
    generation: AtomicU64,
}

impl RuleStore {
    /// Create an unloaded store for `root`.
    pub fn new(root: impl Into<PathBuf>, options: LoadOptions) -> Self {
        Self {
            root: root.into(),
            options,
            current: RwLock::new(None),
            reload_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Create a store and perform the initial load.
    pub fn open(root: impl Into<PathBuf>, options: LoadOptions) -> Result<Self, LoadError> {
        let store = Self::new(root, options);
        let _ = store.reload()?;
        Ok(store)
    }

    /// Create an unloaded store from settings, resolving the rules directory
    /// against `project_root`.
    pub fn from_settings(project_root: &Path, settings: &SteerSettings) -> Self {
        Self::new(
            resolve_source_dir(project_root, &settings.rules.directory),
            LoadOptions::from(&settings.rules),
        )
    }

    /// Directory the store loads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Enumeration options used for every load.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load the directory and swap in the result.
    ///
    /// On failure the previous snapshot (if any) is kept and the error is
    /// returned to the caller.
    pub fn reload(&self) -> Result<Arc<RuleRegistry>, LoadError> {
        let _guard = self.reload_lock.lock();

        match RuleRegistry::load_with(&self.root, &self.options) {
            Ok(registry) => {
                let registry = Arc::new(registry);
                *self.current.write() = Some(Arc::clone(&registry));
                let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
                info!(
                    root = %self.root.display(),
                    count = registry.len(),
                    generation,
                    "rule snapshot replaced"
                );
                Ok(registry)
            }
            Err(error) => {
                warn!(root = %self.root.display(), %error, "rule reload failed");
                Err(error)
            }
        }
    }

    /// The current snapshot, or `None` before the first successful load.
    pub fn snapshot(&self) -> Option<Arc<RuleRegistry>> {
        self.current.read().clone()
    }

    /// Whether a registry has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.current.read().is_some()
    }

    /// Number of successful loads so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Owned copies of the documents active for `path` in the current
    /// snapshot. Empty while unloaded.
    pub fn rules_for(&self, path: &str) -> Vec<RuleDocument> {
        self.snapshot()
            .map(|registry| registry.rules_for(path).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Owned copies of the manual documents in the current snapshot.
    pub fn manual_rules(&self) -> Vec<RuleDocument> {
        self.snapshot()
            .map(|registry| registry.manual_rules().into_iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn new_store_is_unloaded() {
        let store = RuleStore::new("/nonexistent", LoadOptions::default());
        assert!(!store.is_loaded());
        assert!(store.snapshot().is_none());
        assert_eq!(store.generation(), 0);
        assert!(store.rules_for("main.go").is_empty());
    }

    #[test]
    fn reload_swaps_snapshot() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.md"), "first").unwrap();
        let store = RuleStore::open(tmp.path(), LoadOptions::default()).unwrap();
        let before = store.snapshot().unwrap();

        fs::write(tmp.path().join("b.md"), "second").unwrap();
        let after = store.reload().unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert!(!Arc::ptr_eq(&before, &store.snapshot().unwrap()));
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn failed_reload_keeps_previous_snapshot() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.md"), "good").unwrap();
        let store = RuleStore::open(tmp.path(), LoadOptions::default()).unwrap();
        let before = store.snapshot().unwrap();

        fs::write(tmp.path().join("b.md"), "---\ninclusion: sometimes\n---\n").unwrap();
        assert!(store.reload().is_err());

        assert!(Arc::ptr_eq(&before, &store.snapshot().unwrap()));
        assert_eq!(store.generation(), 1);
        assert_eq!(store.rules_for("x")[0].body(), "good");
    }

    #[test]
    fn open_fails_on_missing_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(RuleStore::open(tmp.path().join("missing"), LoadOptions::default()).is_err());
    }

    #[test]
    fn from_settings_resolves_directory() {
        let settings = SteerSettings::default();
        let store = RuleStore::from_settings(Path::new("/work"), &settings);
        assert_eq!(store.root(), Path::new("/work/.kiro/steering"));
        assert!(!store.options().recursive);
    }
}
