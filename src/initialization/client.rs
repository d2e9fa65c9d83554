//! HTTP client initialization.
//!
//! This module provides the outbound client used for geolocation lookups.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{GEO_CLIENT_TIMEOUT_SECS, OUTBOUND_USER_AGENT};

/// Initializes the HTTP client for the geolocation provider.
///
/// Creates a `reqwest::Client` configured with:
/// - A whole-request timeout above the enrichment deadline, so the
///   deadline (not the transport) decides when a lookup is a timeout
/// - A service-identifying User-Agent header
/// - Rustls TLS backend (no native TLS)
///
/// The client is cheap to clone and is shared with every geolocation
/// lookup for connection reuse.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_geo_client() -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(GEO_CLIENT_TIMEOUT_SECS))
        .user_agent(OUTBOUND_USER_AGENT)
        .build()
}
