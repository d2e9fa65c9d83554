//! Enrichment result cache.
//!
//! Cache-aside store with GET/SETEX semantics over pluggable backends. The
//! cache is strictly a latency optimization: every failure below this module
//! is converted into a miss (reads) or dropped (writes), so the pipeline
//! behaves identically whether the backend is healthy, sick, or absent for
//! the life of the process.
//!
//! Backends are a closed set, dispatched through an enum.

mod memory;
mod redis;

pub use self::redis::RedisStore;
pub use memory::MemoryStore;

use std::time::Duration;

/// Pluggable cache store.
///
/// - `Redis`: shared network cache (production)
/// - `Memory`: process-local TTL map (tests, single-node deployments)
/// - `Disabled`: every read is a miss, every write a no-op
pub enum CacheStore {
    /// Redis-backed shared cache
    Redis(RedisStore),
    /// Process-local in-memory cache
    Memory(MemoryStore),
    /// No cache; reads miss, writes vanish
    Disabled,
}

impl CacheStore {
    /// Reads a key.
    ///
    /// Every failure mode (backend unreachable, command timeout, wrong-type
    /// value) is demoted to `None`; callers cannot distinguish a sick cache
    /// from a cold one, and are not supposed to.
    pub async fn get(&self, key: &str) -> Option<String> {
        match self {
            CacheStore::Redis(store) => store.get(key).await,
            CacheStore::Memory(store) => store.get(key),
            CacheStore::Disabled => None,
        }
    }

    /// Best-effort write with expiry.
    ///
    /// # Returns
    ///
    /// Whether the value was stored. `false` is informational only; callers
    /// never treat it as an error.
    pub async fn set(&self, key: &str, value: &str, ttl: Duration) -> bool {
        match self {
            CacheStore::Redis(store) => store.set(key, value, ttl).await,
            CacheStore::Memory(store) => store.set(key, value, ttl),
            CacheStore::Disabled => false,
        }
    }

    /// Whether the backend is expected to serve hits.
    pub fn is_ready(&self) -> bool {
        !matches!(self, CacheStore::Disabled)
    }

    /// Short backend label for logs and the health endpoint.
    pub fn backend(&self) -> &'static str {
        match self {
            CacheStore::Redis(_) => "redis",
            CacheStore::Memory(_) => "memory",
            CacheStore::Disabled => "disabled",
        }
    }
}
