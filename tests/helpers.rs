// Shared test helpers for assembling the lookup pipeline from fakes.
//
// Stub resolvers record call counts so tests can prove whether the cache or
// the backend answered a lookup, and the router helpers drive the HTTP
// surface without binding a listener.

use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use origin_lookup::agent::UserAgentTally;
use origin_lookup::build_router;
use origin_lookup::cache::{CacheStore, MemoryStore};
use origin_lookup::enrich::{Enricher, EnrichmentSettings};
use origin_lookup::error_handling::{LookupStats, ResolverError};
use origin_lookup::extract::{AddressSource, ClientAddress};
use origin_lookup::resolve::{GeoLookup, GeoRecord, ReverseDnsLookup};
use origin_lookup::server::AppState;

/// Reverse DNS fake with a scripted answer, an optional delay, and a call
/// counter.
pub struct StubDnsResolver {
    hostname: Option<String>,
    delay: Duration,
    calls: AtomicUsize,
}

#[allow(dead_code)] // Used by other test files
impl StubDnsResolver {
    pub fn answering(hostname: &str) -> Arc<Self> {
        Arc::new(Self {
            hostname: Some(hostname.to_string()),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            hostname: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn slow(hostname: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            hostname: Some(hostname.to_string()),
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReverseDnsLookup for StubDnsResolver {
    async fn reverse_lookup(&self, ip: IpAddr) -> Result<String, ResolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.hostname {
            Some(name) => Ok(name.clone()),
            None => Err(ResolverError::Lookup(format!("no PTR record for {}", ip))),
        }
    }
}

enum GeoScript {
    Answer(GeoRecord),
    Refuse,
    TimeOut(u64),
}

/// Geolocation fake mirroring [`StubDnsResolver`].
pub struct StubGeoResolver {
    script: GeoScript,
    calls: AtomicUsize,
}

#[allow(dead_code)] // Used by other test files
impl StubGeoResolver {
    pub fn answering(record: GeoRecord) -> Arc<Self> {
        Arc::new(Self {
            script: GeoScript::Answer(record),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn refusing() -> Arc<Self> {
        Arc::new(Self {
            script: GeoScript::Refuse,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn timing_out(ms: u64) -> Arc<Self> {
        Arc::new(Self {
            script: GeoScript::TimeOut(ms),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoLookup for StubGeoResolver {
    async fn lookup(&self, _ip: IpAddr) -> Result<GeoRecord, ResolverError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            GeoScript::Answer(record) => Ok(record.clone()),
            GeoScript::Refuse => Err(ResolverError::Api("private range".to_string())),
            GeoScript::TimeOut(ms) => Err(ResolverError::Timeout(*ms)),
        }
    }
}

/// A geolocation record with every field populated, for round-trip asserts.
#[allow(dead_code)] // Used by other test files
pub fn sample_geo() -> GeoRecord {
    GeoRecord {
        country: Some("United States".to_string()),
        country_code: Some("US".to_string()),
        region: Some("California".to_string()),
        city: Some("Mountain View".to_string()),
        timezone: Some("America/Los_Angeles".to_string()),
        isp: Some("Google LLC".to_string()),
        lat: Some(37.386),
        lon: Some(-122.0838),
    }
}

/// A fully wired enrichment pipeline over fakes, with every collaborator
/// kept accessible for assertions.
pub struct TestPipeline {
    pub enricher: Arc<Enricher>,
    pub cache: Arc<CacheStore>,
    pub dns: Arc<StubDnsResolver>,
    pub geo: Arc<StubGeoResolver>,
    pub stats: Arc<LookupStats>,
    pub tally: Arc<UserAgentTally>,
}

/// Wires an enricher over the given cache backend and stubs.
#[allow(dead_code)] // Used by other test files
pub fn pipeline_over(
    cache: CacheStore,
    dns: Arc<StubDnsResolver>,
    geo: Arc<StubGeoResolver>,
) -> TestPipeline {
    let cache = Arc::new(cache);
    let stats = Arc::new(LookupStats::new());
    let enricher = Arc::new(Enricher::new(
        Arc::clone(&cache),
        dns.clone() as Arc<dyn ReverseDnsLookup>,
        geo.clone() as Arc<dyn GeoLookup>,
        EnrichmentSettings::default(),
        Arc::clone(&stats),
    ));
    TestPipeline {
        enricher,
        cache,
        dns,
        geo,
        stats,
        tally: Arc::new(UserAgentTally::new(64)),
    }
}

/// Wires an enricher over a fresh in-memory cache.
#[allow(dead_code)] // Used by other test files
pub fn memory_pipeline(dns: Arc<StubDnsResolver>, geo: Arc<StubGeoResolver>) -> TestPipeline {
    pipeline_over(CacheStore::Memory(MemoryStore::new()), dns, geo)
}

/// Builds the address an extraction would have produced for `ip`.
#[allow(dead_code)] // Used by other test files
pub fn forwarded_address(ip: &str) -> Option<ClientAddress> {
    Some(ClientAddress {
        ip: ip.parse().expect("test IP should parse"),
        source: AddressSource::XForwardedFor,
    })
}

/// The peer socket address stamped onto every test request.
#[allow(dead_code)] // Used by other test files
pub fn test_peer() -> SocketAddr {
    SocketAddr::from(([203, 0, 113, 9], 4567))
}

/// Builds the full service router over a test pipeline.
#[allow(dead_code)] // Used by other test files
pub fn test_router(pipeline: &TestPipeline) -> Router {
    build_router(AppState {
        enricher: Arc::clone(&pipeline.enricher),
        cache: Arc::clone(&pipeline.cache),
        tally: Arc::clone(&pipeline.tally),
        stats: Arc::clone(&pipeline.stats),
        start_time: Arc::new(Instant::now()),
    })
}

/// Sends one GET through the router with the given headers and the test
/// peer address attached, the way the connect-info make-service would.
#[allow(dead_code)] // Used by other test files
pub async fn get_with_headers(router: &Router, path: &str, headers: &[(&str, &str)]) -> Response {
    let mut builder = Request::builder().uri(path);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let mut request = builder.body(Body::empty()).expect("request should build");
    request.extensions_mut().insert(ConnectInfo(test_peer()));

    router
        .clone()
        .oneshot(request)
        .await
        .expect("router should produce a response")
}

/// The response's content-type, or empty when absent.
#[allow(dead_code)] // Used by other test files
pub fn content_type(response: &Response) -> &str {
    response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// Collects the response body as UTF-8 text.
#[allow(dead_code)] // Used by other test files
pub async fn body_string(response: Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

/// Collects and parses the response body as JSON.
#[allow(dead_code)] // Used by other test files
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).expect("body should be JSON")
}
