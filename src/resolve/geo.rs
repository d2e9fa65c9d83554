//! Geolocation lookups.
//!
//! One HTTP GET per lookup against an ip-api.com style endpoint, bounded by
//! a hard deadline measured from call start. The backend can reject a lookup
//! at the application level (`"status": "fail"`, e.g. for private-range
//! IPs), which is reported separately from transport failures so callers can
//! tell a refusal from an outage.

use std::net::IpAddr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::GEO_TIMEOUT;
use crate::error_handling::ResolverError;

use super::GeoLookup;

/// Geolocation fields passed through from the backend.
///
/// The record is cached and served as-is; every field is optional because
/// the backend omits what it cannot determine. Wire names follow the
/// ip-api.com schema, so cached payloads deserialize back losslessly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    /// Country name
    pub country: Option<String>,
    /// ISO country code
    #[serde(rename = "countryCode")]
    pub country_code: Option<String>,
    /// Region or state name
    #[serde(rename = "regionName")]
    pub region: Option<String>,
    /// City name
    pub city: Option<String>,
    /// IANA timezone
    pub timezone: Option<String>,
    /// Internet service provider
    pub isp: Option<String>,
    /// Latitude
    pub lat: Option<f64>,
    /// Longitude
    pub lon: Option<f64>,
}

/// Wire envelope around [`GeoRecord`]: the status/message pair is protocol,
/// the rest is payload.
#[derive(Deserialize)]
struct GeoApiPayload {
    status: String,
    message: Option<String>,
    #[serde(flatten)]
    record: GeoRecord,
}

/// Geolocation client for ip-api style endpoints.
///
/// Issues exactly one GET per lookup (`<endpoint>/<ip>`). The whole call is
/// wrapped in `GEO_TIMEOUT`; an upstream answer that arrives after the
/// deadline is discarded and reported as a timeout.
pub struct GeoApiClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GeoApiClient {
    /// Creates a client for the given endpoint.
    ///
    /// A trailing slash on the endpoint is tolerated.
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { client, endpoint }
    }

    async fn fetch(&self, url: &str) -> Result<GeoRecord, ResolverError> {
        let response = self.client.get(url).send().await.map_err(map_transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolverError::Transport(format!(
                "HTTP {}",
                status.as_u16()
            )));
        }
        let body = response.text().await.map_err(map_transport)?;
        parse_geo_payload(&body)
    }
}

#[async_trait]
impl GeoLookup for GeoApiClient {
    async fn lookup(&self, ip: IpAddr) -> Result<GeoRecord, ResolverError> {
        let url = format!("{}/{}", self.endpoint, ip);
        match tokio::time::timeout(GEO_TIMEOUT, self.fetch(&url)).await {
            Ok(result) => result,
            Err(_) => Err(ResolverError::Timeout(GEO_TIMEOUT.as_millis() as u64)),
        }
    }
}

fn map_transport(e: reqwest::Error) -> ResolverError {
    // The client's own timeout sits above GEO_TIMEOUT, but classify it the
    // same way if it ever fires first.
    if e.is_timeout() {
        ResolverError::Timeout(GEO_TIMEOUT.as_millis() as u64)
    } else {
        ResolverError::Transport(e.to_string())
    }
}

/// Interprets a 2xx body.
///
/// A `"fail"` status is an application-level rejection; an undecodable body
/// is a transport problem. Any other status is passed through as success,
/// since `"fail"` is the only failure marker the protocol defines.
fn parse_geo_payload(body: &str) -> Result<GeoRecord, ResolverError> {
    let payload: GeoApiPayload = serde_json::from_str(body)
        .map_err(|e| ResolverError::Transport(format!("undecodable body: {}", e)))?;

    if payload.status == "fail" {
        return Err(ResolverError::Api(
            payload
                .message
                .unwrap_or_else(|| "unspecified failure".to_string()),
        ));
    }

    Ok(payload.record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS_BODY: &str = r#"{
        "status": "success",
        "country": "United States",
        "countryCode": "US",
        "region": "CA",
        "regionName": "California",
        "city": "Mountain View",
        "zip": "94043",
        "lat": 37.4192,
        "lon": -122.0574,
        "timezone": "America/Los_Angeles",
        "isp": "Google LLC",
        "org": "Google LLC",
        "as": "AS15169 Google LLC",
        "query": "8.8.8.8"
    }"#;

    #[test]
    fn test_parse_success_body() {
        let record = parse_geo_payload(SUCCESS_BODY).unwrap();
        assert_eq!(record.country.as_deref(), Some("United States"));
        assert_eq!(record.country_code.as_deref(), Some("US"));
        assert_eq!(record.region.as_deref(), Some("California"));
        assert_eq!(record.city.as_deref(), Some("Mountain View"));
        assert_eq!(record.timezone.as_deref(), Some("America/Los_Angeles"));
        assert_eq!(record.isp.as_deref(), Some("Google LLC"));
        assert_eq!(record.lat, Some(37.4192));
        assert_eq!(record.lon, Some(-122.0574));
    }

    #[test]
    fn test_parse_fail_body_is_api_error() {
        let body = r#"{"status":"fail","message":"private range","query":"192.168.1.1"}"#;
        match parse_geo_payload(body) {
            Err(ResolverError::Api(message)) => assert_eq!(message, "private range"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_fail_body_without_message() {
        let body = r#"{"status":"fail"}"#;
        match parse_geo_payload(body) {
            Err(ResolverError::Api(message)) => assert_eq!(message, "unspecified failure"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage_body_is_transport_error() {
        match parse_geo_payload("<html>502</html>") {
            Err(ResolverError::Transport(_)) => {}
            other => panic!("expected Transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_sparse_success_body() {
        // Fields the backend omits stay None instead of failing the parse
        let record = parse_geo_payload(r#"{"status":"success","country":"France"}"#).unwrap();
        assert_eq!(record.country.as_deref(), Some("France"));
        assert!(record.city.is_none());
        assert!(record.lat.is_none());
    }

    #[test]
    fn test_record_round_trips_with_wire_names() {
        let record = parse_geo_payload(SUCCESS_BODY).unwrap();
        let json = serde_json::to_string(&record).unwrap();
        // Cached payloads must keep the backend's field names
        assert!(json.contains("\"countryCode\""));
        assert!(json.contains("\"regionName\""));

        let reparsed: GeoRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(reparsed, record);
    }

    #[test]
    fn test_endpoint_trailing_slash_tolerated() {
        let client = GeoApiClient::new(reqwest::Client::new(), "http://ip-api.com/json/");
        assert_eq!(client.endpoint, "http://ip-api.com/json");
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_backend_is_cut_off_at_the_deadline() {
        // Bound but never accepted: the request goes out and no byte ever
        // comes back, so only the deadline can end the call. The paused
        // clock skips straight to it instead of waiting it out.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let client = GeoApiClient::new(reqwest::Client::new(), endpoint);

        match client.lookup("8.8.8.8".parse().unwrap()).await {
            Err(ResolverError::Timeout(ms)) => {
                assert_eq!(ms, GEO_TIMEOUT.as_millis() as u64)
            }
            other => panic!("expected Timeout, got {:?}", other),
        }
    }
}
