//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the service,
//! including timeouts, TTLs, and other operational parameters.

use std::time::Duration;

// Listener defaults
/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0";
/// Default HTTP listen port
pub const DEFAULT_LISTEN_PORT: u16 = 8080;

// Network operation timeouts
/// Hard deadline for one geolocation API call, measured from call start.
/// Once the deadline passes the lookup is reported as timed out, even if the
/// upstream answer eventually arrives.
pub const GEO_TIMEOUT: Duration = Duration::from_secs(2);
/// reqwest client timeout for geolocation calls in seconds.
/// Kept above GEO_TIMEOUT so the outer deadline owns timeout classification;
/// the client timeout only catches pathological transport stalls.
pub const GEO_CLIENT_TIMEOUT_SECS: u64 = 3;
/// Default reverse-DNS lookup deadline in milliseconds.
/// PTR lookups get the same bounded-deadline treatment as geolocation so a
/// slow DNS server cannot hold a response open indefinitely.
pub const DNS_TIMEOUT_MS: u64 = 2000;
/// Per-attempt query timeout for the hickory resolver in milliseconds.
/// Kept below the lookup deadline so the resolver can retry once instead of
/// burning the whole deadline on a single unresponsive server.
pub const DNS_QUERY_TIMEOUT_MS: u64 = 900;
/// Query attempts per PTR lookup (including the initial attempt)
pub const DNS_ATTEMPTS: usize = 2;

// Cache behavior
/// Default TTL for cached enrichment results in seconds (30 days).
/// Both the `dns:` and `geo:` namespaces use this default; each is
/// independently configurable via the CLI.
pub const ENRICHMENT_TTL_SECS: u64 = 30 * 24 * 60 * 60;
/// Deadline for a single cache command. A slow or wedged backend is treated
/// as a miss rather than allowed to stall the response path.
pub const CACHE_OP_TIMEOUT: Duration = Duration::from_millis(500);
/// Deadline for the initial cache connection attempt at startup.
/// On failure the process runs with the cache disabled for its lifetime;
/// the cache is a latency optimization, never a correctness requirement.
pub const CACHE_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

// Geolocation API
/// Default geolocation endpoint. The client IP is appended as a path
/// segment (`<endpoint>/<ip>`). The free tier is HTTP-only.
pub const DEFAULT_GEO_ENDPOINT: &str = "http://ip-api.com/json";
/// Outbound User-Agent for geolocation API calls
pub const OUTBOUND_USER_AGENT: &str = concat!("origin_lookup/", env!("CARGO_PKG_VERSION"));

// User-agent tally
/// Default bound on distinct user agents tracked by the tally. Least
/// recently seen agents are evicted beyond this, keeping memory flat when
/// clients rotate agent strings.
pub const DEFAULT_MAX_USER_AGENTS: usize = 1024;
