//! Redis cache backend.

use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::config::CACHE_OP_TIMEOUT;

/// Redis-backed cache store.
///
/// Wraps a [`ConnectionManager`], which multiplexes a single connection and
/// reconnects on its own after transient drops. Every command runs under
/// `CACHE_OP_TIMEOUT`, so a stalled backend looks like a miss to callers
/// instead of holding a response open.
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Wraps an established connection manager.
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    pub(crate) async fn get(&self, key: &str) -> Option<String> {
        // Commands take &mut; the manager is a cheap cloneable handle.
        let mut conn = self.manager.clone();
        match tokio::time::timeout(CACHE_OP_TIMEOUT, conn.get::<_, Option<String>>(key)).await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                log::debug!("Cache read failed for {}: {}", key, e);
                None
            }
            Err(_) => {
                log::debug!(
                    "Cache read timed out for {} after {:?}",
                    key,
                    CACHE_OP_TIMEOUT
                );
                None
            }
        }
    }

    pub(crate) async fn set(&self, key: &str, value: &str, ttl: Duration) -> bool {
        let mut conn = self.manager.clone();
        // SETEX rejects a zero expiry; clamp rather than error out.
        let seconds = ttl.as_secs().max(1);
        match tokio::time::timeout(
            CACHE_OP_TIMEOUT,
            conn.set_ex::<_, _, ()>(key, value, seconds),
        )
        .await
        {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                log::warn!("Cache write failed for {}: {}", key, e);
                false
            }
            Err(_) => {
                log::warn!(
                    "Cache write timed out for {} after {:?}",
                    key,
                    CACHE_OP_TIMEOUT
                );
                false
            }
        }
    }
}
