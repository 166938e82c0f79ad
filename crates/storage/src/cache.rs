//! Read-through cache for the remote adapter.
//!
//! Staleness policy: entries are stamped with the generation current at
//! insert time. `invalidate_all` bumps the generation, which lazily expires
//! every earlier entry; a delete evicts its entry eagerly. There is no TTL
//! and no cross-process invalidation — the cache assumes this process is the
//! only writer of the backing store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use serde_json::Value;

struct CacheEntry {
    generation: u64,
    value: Value,
}

pub(crate) struct ReadCache {
    generation: AtomicU64,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ReadCache {
    pub(crate) fn new() -> Self {
        Self { generation: AtomicU64::new(0), entries: Mutex::new(HashMap::new()) }
    }

    pub(crate) fn get(&self, key: &str) -> Option<Value> {
        let current = self.generation.load(Ordering::Acquire);
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).filter(|e| e.generation == current).map(|e| e.value.clone())
    }

    pub(crate) fn put(&self, key: &str, value: Value) {
        let generation = self.generation.load(Ordering::Acquire);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), CacheEntry { generation, value });
    }

    pub(crate) fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
    }

    /// Expire every current entry without touching the map.
    pub(crate) fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::ReadCache;
    use serde_json::json;

    #[test]
    fn generation_bump_expires_existing_entries() {
        let cache = ReadCache::new();
        cache.put("a.json", json!({"v": 1}));
        assert_eq!(cache.get("a.json"), Some(json!({"v": 1})));

        cache.invalidate_all();
        assert_eq!(cache.get("a.json"), None);

        // Entries written after the bump are live again.
        cache.put("a.json", json!({"v": 2}));
        assert_eq!(cache.get("a.json"), Some(json!({"v": 2})));
    }

    #[test]
    fn remove_evicts_single_key() {
        let cache = ReadCache::new();
        cache.put("a.json", json!(1));
        cache.put("b.json", json!(2));
        cache.remove("a.json");
        assert_eq!(cache.get("a.json"), None);
        assert_eq!(cache.get("b.json"), Some(json!(2)));
    }
}
