//! A small string key-value store.
//!
//! Unrelated to the columnar engine; it owns its own lock, so traffic on
//! the store never contends with encoding.

use rustc_hash::FxHashMap;

use crate::sync::{self, RwLock};

/// Thread-safe string map with put/get/delete.
#[derive(Debug)]
pub struct KeyValueStore {
    entries: RwLock<FxHashMap<String, String>>,
}

impl Default for KeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        sync::write(&self.entries).insert(key.into(), value.into())
    }

    /// Returns a copy of the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        sync::read(&self.entries).get(key).cloned()
    }

    /// Removes `key`. Returns true if it was present.
    pub fn delete(&self, key: &str) -> bool {
        sync::write(&self.entries).remove(key).is_some()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        sync::read(&self.entries).len()
    }

    /// Returns true if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        sync::read(&self.entries).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_delete() {
        let store = KeyValueStore::new();

        assert_eq!(store.put("hello", "world"), None);
        assert_eq!(store.get("hello").as_deref(), Some("world"));

        assert!(store.delete("hello"));
        assert_eq!(store.get("hello"), None);
        assert!(!store.delete("hello"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_replaces_and_returns_previous() {
        let store = KeyValueStore::new();
        store.put("k", "v1");

        let previous = store.put("k", "v2");

        assert_eq!(previous.as_deref(), Some("v1"));
        assert_eq!(store.get("k").as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_key_is_not_found() {
        let store = KeyValueStore::new();
        assert_eq!(store.get("absent"), None);
    }

    #[test]
    fn test_concurrent_writers_distinct_keys() {
        let store = std::sync::Arc::new(KeyValueStore::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        store.put(format!("{t}-{i}"), i.to_string());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer panicked");
        }

        assert_eq!(store.len(), 400);
        assert_eq!(store.get("3-99").as_deref(), Some("99"));
    }
}
