//! Enrichment orchestration.
//!
//! Runs the two enrichment streams (reverse DNS and geolocation)
//! concurrently over a cache-aside policy. Each stream is independent: a
//! failure or deadline on one leaves the other's result intact, and a
//! malformed cache payload is demoted to a miss and overwritten on the next
//! successful resolve. Enrichment never fails; the worst case is a result
//! with both fields absent.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::CacheStore;
use crate::config::{Config, DNS_TIMEOUT_MS, ENRICHMENT_TTL_SECS};
use crate::error_handling::{
    record_dns_error, record_geo_error, ErrorType, InfoType, LookupStats, ResolverError,
};
use crate::extract::ClientAddress;
use crate::resolve::{GeoLookup, GeoRecord, ReverseDnsLookup};

fn dns_key(ip: IpAddr) -> String {
    format!("dns:{}", ip)
}

fn geo_key(ip: IpAddr) -> String {
    format!("geo:{}", ip)
}

/// Per-stream wall-clock timings in milliseconds.
///
/// Each stream's figure covers its cache read, so a hit shows up as a
/// near-zero timing rather than an absent one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnrichmentTimings {
    /// Reverse-DNS stream duration
    pub dns_ms: u64,
    /// Geolocation stream duration
    pub geo_ms: u64,
}

/// Everything the pipeline learned about one request's origin.
#[derive(Debug, Clone)]
pub struct EnrichmentResult {
    /// The validated client address, when extraction produced one
    pub address: Option<ClientAddress>,
    /// First PTR name for the address
    pub reverse_name: Option<String>,
    /// Geolocation record for the address
    pub geo: Option<GeoRecord>,
    /// Stream timings
    pub timings: EnrichmentTimings,
}

/// Tunables for the orchestrator.
#[derive(Debug, Clone)]
pub struct EnrichmentSettings {
    /// TTL for the `dns:` namespace
    pub dns_ttl: Duration,
    /// TTL for the `geo:` namespace
    pub geo_ttl: Duration,
    /// Deadline for one reverse-DNS lookup
    pub dns_timeout: Duration,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            dns_ttl: Duration::from_secs(ENRICHMENT_TTL_SECS),
            geo_ttl: Duration::from_secs(ENRICHMENT_TTL_SECS),
            dns_timeout: Duration::from_millis(DNS_TIMEOUT_MS),
        }
    }
}

impl From<&Config> for EnrichmentSettings {
    fn from(config: &Config) -> Self {
        Self {
            dns_ttl: Duration::from_secs(config.dns_ttl_secs),
            geo_ttl: Duration::from_secs(config.geo_ttl_secs),
            dns_timeout: Duration::from_millis(config.dns_timeout_ms),
        }
    }
}

/// Enrichment orchestrator.
///
/// Owns nothing but handles: the cache, both resolvers, and the stats sink
/// all arrive through the constructor.
pub struct Enricher {
    cache: Arc<CacheStore>,
    dns: Arc<dyn ReverseDnsLookup>,
    geo: Arc<dyn GeoLookup>,
    settings: EnrichmentSettings,
    stats: Arc<LookupStats>,
}

impl Enricher {
    /// Creates an orchestrator from its collaborators.
    pub fn new(
        cache: Arc<CacheStore>,
        dns: Arc<dyn ReverseDnsLookup>,
        geo: Arc<dyn GeoLookup>,
        settings: EnrichmentSettings,
        stats: Arc<LookupStats>,
    ) -> Self {
        Self {
            cache,
            dns,
            geo,
            settings,
            stats,
        }
    }

    /// Enriches one extracted address.
    ///
    /// Both streams run concurrently and join before returning, so the call
    /// is bounded by the slower stream, not the sum. With no address there
    /// is nothing to look up and the result is empty. This function never
    /// fails.
    pub async fn enrich(&self, address: Option<ClientAddress>) -> EnrichmentResult {
        let Some(client) = address else {
            return EnrichmentResult {
                address: None,
                reverse_name: None,
                geo: None,
                timings: EnrichmentTimings::default(),
            };
        };

        let ip = client.ip;
        let ((reverse_name, dns_ms), (geo, geo_ms)) =
            tokio::join!(self.dns_stream(ip), self.geo_stream(ip));

        EnrichmentResult {
            address: Some(client),
            reverse_name,
            geo,
            timings: EnrichmentTimings { dns_ms, geo_ms },
        }
    }

    async fn dns_stream(&self, ip: IpAddr) -> (Option<String>, u64) {
        let started = Instant::now();
        let key = dns_key(ip);

        if let Some(name) = self
            .cache_read::<String>(&key, InfoType::DnsCacheHit, InfoType::DnsCacheMiss)
            .await
        {
            return (Some(name), elapsed_ms(started));
        }

        // The resolver itself carries no deadline; this layer owns it.
        let deadline = self.settings.dns_timeout;
        let resolved = match tokio::time::timeout(deadline, self.dns.reverse_lookup(ip)).await {
            Ok(result) => result,
            Err(_) => Err(ResolverError::Timeout(deadline.as_millis() as u64)),
        };

        let name = match resolved {
            Ok(name) => name,
            Err(e) => {
                log::warn!("Reverse DNS lookup failed for {}: {}", ip, e);
                record_dns_error(&self.stats, &e);
                return (None, elapsed_ms(started));
            }
        };

        self.cache_write(&key, &name, self.settings.dns_ttl).await;
        (Some(name), elapsed_ms(started))
    }

    async fn geo_stream(&self, ip: IpAddr) -> (Option<GeoRecord>, u64) {
        let started = Instant::now();
        let key = geo_key(ip);

        if let Some(record) = self
            .cache_read::<GeoRecord>(&key, InfoType::GeoCacheHit, InfoType::GeoCacheMiss)
            .await
        {
            return (Some(record), elapsed_ms(started));
        }

        let record = match self.geo.lookup(ip).await {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Geolocation lookup failed for {}: {}", ip, e);
                record_geo_error(&self.stats, &e);
                return (None, elapsed_ms(started));
            }
        };

        self.cache_write(&key, &record, self.settings.geo_ttl).await;
        (Some(record), elapsed_ms(started))
    }

    /// Cache-aside read. A hit must also deserialize cleanly; anything else
    /// is demoted to a miss so the resolve path runs and overwrites it.
    async fn cache_read<T: DeserializeOwned>(
        &self,
        key: &str,
        hit: InfoType,
        miss: InfoType,
    ) -> Option<T> {
        let Some(payload) = self.cache.get(key).await else {
            self.stats.increment_info(miss);
            return None;
        };

        match serde_json::from_str::<T>(&payload) {
            Ok(value) => {
                self.stats.increment_info(hit);
                Some(value)
            }
            Err(e) => {
                log::debug!("Discarding malformed cache entry {}: {}", key, e);
                self.stats.increment_info(InfoType::MalformedCacheEntry);
                self.stats.increment_info(miss);
                None
            }
        }
    }

    /// Best-effort write-back; failures are counted and forgotten. Writes
    /// against a disabled store are expected no-ops, not errors.
    async fn cache_write<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                log::debug!("Failed to serialize cache entry {}: {}", key, e);
                self.stats.increment_error(ErrorType::CacheWriteError);
                return;
            }
        };

        if !self.cache.set(key, &payload, ttl).await && self.cache.is_ready() {
            self.stats.increment_error(ErrorType::CacheWriteError);
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_namespace_keys() {
        let v4 = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));
        assert_eq!(dns_key(v4), "dns:8.8.8.8");
        assert_eq!(geo_key(v4), "geo:8.8.8.8");

        let v6: IpAddr = "2001:db8::1".parse().unwrap();
        assert_eq!(dns_key(v6), "dns:2001:db8::1");
        assert_eq!(geo_key(v6), "geo:2001:db8::1");
    }

    #[test]
    fn test_settings_default_matches_constants() {
        let settings = EnrichmentSettings::default();
        assert_eq!(settings.dns_ttl, Duration::from_secs(30 * 24 * 60 * 60));
        assert_eq!(settings.geo_ttl, settings.dns_ttl);
        assert_eq!(settings.dns_timeout, Duration::from_millis(2000));
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            dns_ttl_secs: 60,
            geo_ttl_secs: 120,
            dns_timeout_ms: 250,
            ..Default::default()
        };
        let settings = EnrichmentSettings::from(&config);
        assert_eq!(settings.dns_ttl, Duration::from_secs(60));
        assert_eq!(settings.geo_ttl, Duration::from_secs(120));
        assert_eq!(settings.dns_timeout, Duration::from_millis(250));
    }
}
