//! Session-scoped key-value storage.
//!
//! This module provides the storage seam for the snapshot cache:
//!
//! - [`SessionStore`], the injected capability over a `sessionStorage`-shaped
//!   string store
//! - [`SessionHash`], a namespaced read-modify-write adapter that keeps one
//!   JSON blob per namespace, mapping sub-keys to serialized values
//!
//! An unavailable store is not an error: every operation degrades to a no-op
//! returning absent, which callers surface as a cache miss.

pub mod memory;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use memory::MemoryStore;

/// Capability over a session-scoped string key-value store.
///
/// Hosts inject an implementation at construction; [`MemoryStore`] serves
/// tests and hosts without a DOM.
pub trait SessionStore: Send + Sync {
    /// Whether the backing store can be used at all.
    ///
    /// When this returns false the cache treats every read as absent and
    /// every write as a no-op.
    fn available(&self) -> bool {
        true
    }

    /// Read the raw string stored under `key`, if any.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, overwriting any previous value.
    fn set_item(&self, key: &str, value: &str);

    /// Delete `key` and its value. No-op when absent.
    fn remove_item(&self, key: &str);
}

/// Namespaced hash adapter over a [`SessionStore`].
///
/// Each namespace is persisted as a single JSON object mapping sub-keys to
/// JSON-stringified values. Every operation re-reads and re-writes the whole
/// blob; the session store is the sole source of truth.
#[derive(Clone)]
pub struct SessionHash {
    store: Arc<dyn SessionStore>,
}

impl SessionHash {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Whether the underlying store is usable.
    pub fn available(&self) -> bool {
        self.store.available()
    }

    /// Load the full mapping for `namespace`.
    ///
    /// A missing or malformed blob reads as an empty mapping, never an error.
    pub fn load(&self, namespace: &str) -> HashMap<String, String> {
        if !self.store.available() {
            return HashMap::new();
        }

        let Some(raw) = self.store.get_item(namespace) else {
            return HashMap::new();
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("discarding malformed blob for namespace {namespace}: {e}");
                HashMap::new()
            }
        }
    }

    /// Write the full mapping for `namespace` back to the store.
    pub fn save(&self, namespace: &str, entries: &HashMap<String, String>) {
        if !self.store.available() {
            return;
        }

        match serde_json::to_string(entries) {
            Ok(raw) => self.store.set_item(namespace, &raw),
            Err(e) => tracing::warn!("failed to serialize namespace {namespace}: {e}"),
        }
    }

    /// Insert or overwrite `key` within `namespace`.
    pub fn set<T: Serialize>(&self, namespace: &str, key: &str, value: &T) {
        if !self.store.available() {
            return;
        }

        let serialized = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("failed to serialize value for {namespace}/{key}: {e}");
                return;
            }
        };

        let mut entries = self.load(namespace);
        entries.insert(key.to_string(), serialized);
        self.save(namespace, &entries);
    }

    /// Delete `key` from `namespace`. No-op when absent.
    pub fn remove(&self, namespace: &str, key: &str) {
        if !self.store.available() {
            return;
        }

        let mut entries = self.load(namespace);
        entries.remove(key);
        self.save(namespace, &entries);
    }

    /// Read and deserialize the value stored under `key` in `namespace`.
    ///
    /// Absence is tracked by key-presence in the mapping, not by truthiness
    /// of the stored value: a present key whose value deserializes to a
    /// falsy `T` still reads as present. A present key whose value fails to
    /// deserialize reads as absent.
    pub fn get<T: DeserializeOwned>(&self, namespace: &str, key: &str) -> Option<T> {
        let entries = self.load(namespace);
        let raw = entries.get(key)?;

        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("discarding malformed value for {namespace}/{key}: {e}");
                None
            }
        }
    }

    /// Delete an entire namespace in one store operation.
    pub fn clear(&self, namespace: &str) {
        if !self.store.available() {
            return;
        }

        self.store.remove_item(namespace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UnavailableStore;

    impl SessionStore for UnavailableStore {
        fn available(&self) -> bool {
            false
        }

        fn get_item(&self, _key: &str) -> Option<String> {
            None
        }

        fn set_item(&self, _key: &str, _value: &str) {
            panic!("set_item called on unavailable store");
        }

        fn remove_item(&self, _key: &str) {
            panic!("remove_item called on unavailable store");
        }
    }

    fn hash() -> SessionHash {
        SessionHash::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_set_then_get() {
        let hash = hash();
        hash.set("ns", "a", &"hello".to_string());

        let value: Option<String> = hash.get("ns", "a");
        assert_eq!(value, Some("hello".to_string()));
    }

    #[test]
    fn test_get_missing_key() {
        let hash = hash();
        hash.set("ns", "a", &1);

        assert_eq!(hash.get::<i64>("ns", "b"), None);
        assert_eq!(hash.get::<i64>("other", "a"), None);
    }

    #[test]
    fn test_falsy_value_is_still_present() {
        let hash = hash();
        hash.set("ns", "flag", &false);
        hash.set("ns", "zero", &0);
        hash.set("ns", "empty", &String::new());

        assert_eq!(hash.get::<bool>("ns", "flag"), Some(false));
        assert_eq!(hash.get::<i64>("ns", "zero"), Some(0));
        assert_eq!(hash.get::<String>("ns", "empty"), Some(String::new()));
    }

    #[test]
    fn test_remove_key() {
        let hash = hash();
        hash.set("ns", "a", &1);
        hash.set("ns", "b", &2);
        hash.remove("ns", "a");

        assert_eq!(hash.get::<i64>("ns", "a"), None);
        assert_eq!(hash.get::<i64>("ns", "b"), Some(2));
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let hash = hash();
        hash.remove("ns", "nope");
        assert!(hash.load("ns").is_empty());
    }

    #[test]
    fn test_malformed_blob_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set_item("ns", "this is not json");

        let hash = SessionHash::new(store);
        assert!(hash.load("ns").is_empty());
        assert_eq!(hash.get::<i64>("ns", "a"), None);
    }

    #[test]
    fn test_malformed_value_reads_as_absent() {
        let store = Arc::new(MemoryStore::new());
        store.set_item("ns", r#"{"a":"not a number"}"#);

        let hash = SessionHash::new(store);
        assert_eq!(hash.get::<i64>("ns", "a"), None);
    }

    #[test]
    fn test_clear_removes_namespace() {
        let store = Arc::new(MemoryStore::new());
        let hash = SessionHash::new(store.clone());
        hash.set("ns", "a", &1);
        hash.clear("ns");

        assert_eq!(store.get_item("ns"), None);
    }

    #[test]
    fn test_unavailable_store_degrades_to_noop() {
        let hash = SessionHash::new(Arc::new(UnavailableStore));

        hash.set("ns", "a", &1);
        hash.remove("ns", "a");
        hash.clear("ns");

        assert!(!hash.available());
        assert_eq!(hash.get::<i64>("ns", "a"), None);
        assert!(hash.load("ns").is_empty());
    }
}
