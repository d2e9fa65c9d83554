//! User-agent tally.
//!
//! Counts requests per exact user-agent string, bounded by an LRU so
//! rotating agent strings cannot grow memory without limit. The lifetime
//! total keeps counting across evictions; only per-agent detail is lost.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use lru::LruCache;
use serde::Serialize;

/// Aggregate view of the tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TallySnapshot {
    /// Distinct agent strings currently tracked (bounded by capacity)
    pub unique_agents: usize,
    /// Requests recorded over the process lifetime, evicted agents included
    pub total_requests: u64,
}

/// Bounded per-agent request counter.
///
/// The mutex guards a single increment-or-insert and is never held across
/// an await.
pub struct UserAgentTally {
    agents: Mutex<LruCache<String, u64>>,
    total: AtomicU64,
}

impl UserAgentTally {
    /// Creates a tally tracking at most `capacity` distinct agents.
    ///
    /// A zero capacity is bumped to one rather than rejected.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            agents: Mutex::new(LruCache::new(capacity)),
            total: AtomicU64::new(0),
        }
    }

    /// Records one request.
    ///
    /// The exact string is the key; an absent user-agent is recorded under
    /// the empty string so those requests still count toward the total.
    pub fn record(&self, user_agent: Option<&str>) {
        let key = user_agent.unwrap_or("");
        let mut agents = self
            .agents
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match agents.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                agents.put(key.to_string(), 1);
            }
        }
        drop(agents);
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    /// Requests recorded for one exact agent string, if it is still tracked.
    ///
    /// Returns `None` after eviction; the lifetime total is unaffected.
    pub fn count_for(&self, user_agent: &str) -> Option<u64> {
        let agents = self
            .agents
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        agents.peek(user_agent).copied()
    }

    /// Aggregate counts for the stats endpoint.
    pub fn snapshot(&self) -> TallySnapshot {
        let agents = self
            .agents
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        TallySnapshot {
            unique_agents: agents.len(),
            total_requests: self.total.load(Ordering::Relaxed),
        }
    }
}
