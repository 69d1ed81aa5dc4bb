//! Recently-deleted folder bookkeeping
//!
//! Listings on an eventually-consistent store can keep showing a folder for a
//! while after its last object is gone. The set below remembers prefixes the
//! deleter has confirmed removed so the listing layer can hide them right
//! away. Entries never expire on their own; recreating the folder clears its
//! entry.

use log::warn;
use serde_json::json;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Persistence collaborator for [`RecentlyDeletedSet`]. Injected so the set
/// can be backed by a file in production and by memory in tests.
pub trait RecentStore {
    fn load(&self) -> io::Result<HashSet<String>>;
    fn persist(&self, prefixes: &HashSet<String>) -> io::Result<()>;
}

/// Prefixes recently confirmed deleted. Mutations persist eagerly; persist
/// failures are logged and swallowed, the in-memory copy stays authoritative
/// for the rest of the process.
pub struct RecentlyDeletedSet<P> {
    prefixes: HashSet<String>,
    store: P,
}

impl<P: RecentStore> RecentlyDeletedSet<P> {
    /// Load the persisted set; an unreadable or missing copy starts empty.
    pub fn load(store: P) -> Self {
        let prefixes = match store.load() {
            Ok(prefixes) => prefixes,
            Err(e) => {
                warn!("could not load recently-deleted set: {}", e);
                HashSet::new()
            }
        };
        Self { prefixes, store }
    }

    /// Mark a prefix as deleted and persist.
    pub fn record(&mut self, prefix: &str) {
        self.prefixes.insert(prefix.to_string());
        self.persist();
    }

    /// Forget a prefix (the caller recreated that folder) and persist.
    pub fn clear(&mut self, prefix: &str) {
        if self.prefixes.remove(prefix) {
            self.persist();
        }
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.prefixes.contains(prefix)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    fn persist(&self) {
        if let Err(e) = self.store.persist(&self.prefixes) {
            warn!("could not persist recently-deleted set: {}", e);
        }
    }
}

/// JSON-file persistence: one sorted array of prefixes per file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecentStore for JsonFileStore {
    fn load(&self) -> io::Result<HashSet<String>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => return Err(e),
        };
        Ok(serde_json::from_str(&data)?)
    }

    fn persist(&self, prefixes: &HashSet<String>) -> io::Result<()> {
        let mut sorted: Vec<&str> = prefixes.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        fs::write(&self.path, json!(sorted).to_string())
    }
}

/// In-memory persistence for tests and embedders without a writable disk.
/// Clones share one backing set.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl RecentStore for MemoryStore {
    fn load(&self) -> io::Result<HashSet<String>> {
        Ok(self.inner.lock().unwrap().clone())
    }

    fn persist(&self, prefixes: &HashSet<String>) -> io::Result<()> {
        *self.inner.lock().unwrap() = prefixes.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("deleted.json"));
        let set = RecentlyDeletedSet::load(store);
        assert!(set.is_empty());
    }

    #[test]
    fn recorded_prefixes_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deleted.json");

        let mut set = RecentlyDeletedSet::load(JsonFileStore::new(&path));
        set.record("docs/");
        set.record("old/photos/");

        let reloaded = RecentlyDeletedSet::load(JsonFileStore::new(&path));
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("docs/"));
        assert!(reloaded.contains("old/photos/"));
    }

    #[test]
    fn clear_removes_the_entry_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deleted.json");

        let mut set = RecentlyDeletedSet::load(JsonFileStore::new(&path));
        set.record("docs/");
        set.clear("docs/");
        assert!(!set.contains("docs/"));

        let reloaded = RecentlyDeletedSet::load(JsonFileStore::new(&path));
        assert!(!reloaded.contains("docs/"));
    }

    #[test]
    fn clearing_an_unknown_prefix_is_a_no_op() {
        let mut set = RecentlyDeletedSet::load(MemoryStore::default());
        set.record("a/");
        set.clear("b/");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn memory_store_clones_share_the_backing_set() {
        let store = MemoryStore::default();
        let mut set = RecentlyDeletedSet::load(store.clone());
        set.record("gone/");

        let reloaded = RecentlyDeletedSet::load(store);
        assert!(reloaded.contains("gone/"));
    }
}
