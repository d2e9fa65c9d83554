//! In-memory cache backend.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Process-local TTL cache.
///
/// Entries expire lazily on read. Backs tests and single-node deployments
/// that want cache semantics without a Redis to talk to.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

struct Entry {
    value: String,
    cached_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.cached_at.elapsed() >= self.ttl
    }
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get(&self, key: &str) -> Option<String> {
        // A poisoned lock only means a writer panicked between two operations
        // that are each atomic on the map; the data is still usable.
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub(crate) fn set(&self, key: &str, value: &str, ttl: Duration) -> bool {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                cached_at: Instant::now(),
                ttl,
            },
        );
        true
    }
}
