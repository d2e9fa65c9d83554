//! Cache backend initialization.
//!
//! The cache is strictly an accelerator. Connection is attempted once at
//! startup with a hard deadline; if no URL is configured or the connection
//! fails, the service starts with the cache disabled instead of refusing
//! to run.

use redis::aio::ConnectionManager;

use crate::cache::{CacheStore, RedisStore};
use crate::config::{Config, CACHE_CONNECT_TIMEOUT};

/// Initializes the enrichment cache from configuration.
///
/// The Redis URL is taken from `--redis-url`, falling back to the
/// `REDIS_URL` environment variable. Absence of both selects the disabled
/// backend.
///
/// # Arguments
///
/// * `config` - Parsed command-line configuration
///
/// # Returns
///
/// A ready [`CacheStore`]; never an error. Cache unavailability is a
/// degraded mode, not a startup failure.
pub async fn init_cache(config: &Config) -> CacheStore {
    let url = config
        .redis_url
        .clone()
        .or_else(|| std::env::var("REDIS_URL").ok());

    let Some(url) = url else {
        log::info!("No Redis URL configured; enrichment cache disabled");
        return CacheStore::Disabled;
    };

    let client = match redis::Client::open(url.as_str()) {
        Ok(client) => client,
        Err(e) => {
            log::warn!("Invalid Redis URL, enrichment cache disabled: {}", e);
            return CacheStore::Disabled;
        }
    };

    match tokio::time::timeout(CACHE_CONNECT_TIMEOUT, ConnectionManager::new(client)).await {
        Ok(Ok(manager)) => {
            log::info!("Connected to Redis enrichment cache");
            CacheStore::Redis(RedisStore::new(manager))
        }
        Ok(Err(e)) => {
            log::warn!("Redis connection failed, enrichment cache disabled: {}", e);
            CacheStore::Disabled
        }
        Err(_) => {
            log::warn!(
                "Redis connection timed out after {:?}, enrichment cache disabled",
                CACHE_CONNECT_TIMEOUT
            );
            CacheStore::Disabled
        }
    }
}
