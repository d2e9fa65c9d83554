//! Lookup service data structures.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::agent::{TallySnapshot, UserAgentTally};
use crate::cache::CacheStore;
use crate::enrich::{Enricher, EnrichmentTimings};
use crate::error_handling::LookupStats;
use crate::resolve::GeoRecord;

/// Shared state for the lookup service.
///
/// Everything is behind `Arc`, so cloning per request is pointer-cheap.
#[derive(Clone)]
pub struct AppState {
    /// Enrichment orchestrator
    pub enricher: Arc<Enricher>,
    /// Cache handle (the same store the enricher uses), for readiness reporting
    pub cache: Arc<CacheStore>,
    /// Per-agent request tally
    pub tally: Arc<UserAgentTally>,
    /// Error and info counters
    pub stats: Arc<LookupStats>,
    /// Process start, for uptime reporting
    pub start_time: Arc<Instant>,
}

/// JSON response for lookup endpoints.
#[derive(Serialize)]
pub struct LookupResponse {
    /// The client IP the pipeline settled on
    pub ip: String,
    /// Which header (or fallback) supplied it
    pub source: &'static str,
    /// First PTR name, when reverse DNS produced one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Geolocation record, when the geo stream produced one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoRecord>,
    /// Per-stream lookup timings
    pub timings: EnrichmentTimings,
}

/// JSON body when no client IP could be determined.
///
/// Carries the raw material of the failed extraction so the caller can see
/// what the service saw.
#[derive(Serialize)]
pub struct UnresolvedResponse {
    /// Fixed marker string
    pub error: &'static str,
    /// The normalized candidate that failed to parse, when there was one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<String>,
    /// Which header supplied the candidate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
    /// Full received header set
    pub headers: BTreeMap<String, String>,
    /// Raw peer socket address
    pub peer_addr: String,
}

/// JSON response for `/health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the process can answer at all
    pub status: &'static str,
    /// Whether the enrichment cache is expected to serve hits
    pub cache_ready: bool,
    /// Which cache backend is in use
    pub cache_backend: &'static str,
}

/// JSON response for `/stats`.
#[derive(Serialize)]
pub struct StatsResponse {
    /// Seconds since process start
    pub uptime_seconds: f64,
    /// User-agent tally aggregates
    pub user_agents: TallySnapshot,
    /// Error counters by category
    pub errors: BTreeMap<&'static str, usize>,
    /// Info counters by category
    pub info: BTreeMap<&'static str, usize>,
}
