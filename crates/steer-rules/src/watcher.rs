//! Directory watcher that reloads a [`RuleStore`] on change.
//!
//! Filesystem events arrive in bursts (an editor save is often a create,
//! a write and a rename). The worker waits until no event has arrived for
//! the debounce window, then performs one full reload.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use steer_settings::WatchSettings;
use tracing::{debug, warn};

use crate::errors::WatchError;
use crate::store::RuleStore;

/// Keeps a store in sync with its directory until dropped.
pub struct RuleWatcher {
    watcher: Option<RecommendedWatcher>,
    worker: Option<JoinHandle<()>>,
}

impl RuleWatcher {
    /// Start watching `store.root()`.
    ///
    /// The watch is recursive when the store loads recursively.
    pub fn spawn(store: Arc<RuleStore>, debounce: Duration) -> Result<Self, WatchError> {
        let root = store.root().to_path_buf();
        let (tx, rx) = mpsc::channel();

        let mut watcher = notify::recommended_watcher(tx).map_err(|source| WatchError::Notify {
            path: root.clone(),
            source,
        })?;
        let mode = if store.options().recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(&root, mode)
            .map_err(|source| WatchError::Notify {
                path: root.clone(),
                source,
            })?;

        let worker = std::thread::Builder::new()
            .name("steer-rule-watcher".to_string())
            .spawn(move || run(&rx, &store, debounce))?;

        debug!(root = %root.display(), ?debounce, "watching rule directory");
        Ok(Self {
            watcher: Some(watcher),
            worker: Some(worker),
        })
    }

    /// Start watching if `settings` enable it; `Ok(None)` otherwise.
    pub fn from_settings(
        store: Arc<RuleStore>,
        settings: &WatchSettings,
    ) -> Result<Option<Self>, WatchError> {
        if !settings.enabled {
            debug!(root = %store.root().display(), "rule watching disabled");
            return Ok(None);
        }
        Self::spawn(store, Duration::from_millis(settings.debounce_ms)).map(Some)
    }
}

impl Drop for RuleWatcher {
    fn drop(&mut self) {
        // Dropping the watcher drops its sender, which ends the worker loop
        drop(self.watcher.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn run(rx: &Receiver<notify::Result<Event>>, store: &RuleStore, debounce: Duration) {
    while let Ok(first) = rx.recv() {
        let mut changed = is_change(&first);
        loop {
            match rx.recv_timeout(debounce) {
                Ok(next) => changed |= is_change(&next),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => return,
            }
        }

        if !changed {
            continue;
        }
        // The store logs the outcome; a failure keeps the previous snapshot
        let _ = store.reload();
    }
}

/// Whether an event can change what a load would produce.
fn is_change(event: &notify::Result<Event>) -> bool {
    match event {
        Ok(event) => !matches!(event.kind, EventKind::Access(_)),
        Err(error) => {
            warn!(%error, "rule watcher error, reloading to resync");
            true
        }
    }
}
