//! Request handlers for the lookup service.
//!
//! Lookup handlers always answer 200: enrichment degradation yields a
//! partial body, and extraction failure yields an explicit marker body
//! carrying the headers the service received.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::agent::classify_user_agent;
use crate::config::HEADER_USER_AGENT;
use crate::enrich::EnrichmentResult;
use crate::error_handling::InfoType;
use crate::extract::{extract_client_ip, AddressSource, ClientAddress, Extraction};

use super::types::{
    AppState, HealthResponse, LookupResponse, StatsResponse, UnresolvedResponse,
};

/// Marker string returned when extraction produced no usable address.
const UNRESOLVED_MARKER: &str = "could not determine client IP";

/// Primary lookup endpoint.
///
/// Browsers get a human-readable text block; every other agent gets JSON.
pub async fn lookup_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    handle_lookup(state, headers, peer, false).await
}

/// Lookup endpoint that answers JSON regardless of user agent.
pub async fn lookup_json_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Response {
    handle_lookup(state, headers, peer, true).await
}

/// Liveness endpoint reporting cache readiness.
pub async fn health_handler(State(state): State<AppState>) -> Response {
    let response = HealthResponse {
        status: "ok",
        cache_ready: state.cache.is_ready(),
        cache_backend: state.cache.backend(),
    };
    json_response(StatusCode::OK, &response)
}

/// Counter endpoint exposing lookup outcomes and the user-agent tally.
pub async fn stats_handler(State(state): State<AppState>) -> Response {
    let response = StatsResponse {
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        user_agents: state.tally.snapshot(),
        errors: state.stats.error_counts(),
        info: state.stats.info_counts(),
    };
    json_response(StatusCode::OK, &response)
}

/// Runs the full pipeline for one request: tally, extract, enrich, render.
async fn handle_lookup(
    state: AppState,
    headers: HeaderMap,
    peer: SocketAddr,
    force_json: bool,
) -> Response {
    let user_agent = headers.get(HEADER_USER_AGENT).and_then(|v| v.to_str().ok());
    state.tally.record(user_agent);
    let wants_json = force_json || !classify_user_agent(user_agent).is_browser();

    let extraction = extract_client_ip(&headers, Some(peer.ip()));
    if extraction.source == Some(AddressSource::Connection) {
        state.stats.increment_info(InfoType::PeerFallback);
    }

    let Some(address) = extraction.address else {
        state.stats.increment_info(InfoType::ExtractionFailed);
        log::debug!(
            "No usable client IP: candidate {:?} via {:?} from {}",
            extraction.candidate,
            extraction.source,
            peer
        );
        return render_unresolved(&extraction, &headers, peer, wants_json);
    };

    let result = state.enricher.enrich(Some(address)).await;

    if wants_json {
        render_json_lookup(address, &result)
    } else {
        render_text_lookup(address, &result)
    }
}

fn render_json_lookup(address: ClientAddress, result: &EnrichmentResult) -> Response {
    let response = LookupResponse {
        ip: address.ip.to_string(),
        source: address.source.as_str(),
        hostname: result.reverse_name.clone(),
        geo: result.geo.clone(),
        timings: result.timings,
    };
    json_response(StatusCode::OK, &response)
}

fn render_text_lookup(address: ClientAddress, result: &EnrichmentResult) -> Response {
    let mut lines = vec![
        format!("ip: {}", address.ip),
        format!("source: {}", address.source),
    ];
    if let Some(name) = &result.reverse_name {
        lines.push(format!("hostname: {}", name));
    }
    if let Some(geo) = &result.geo {
        let location: Vec<&str> = [geo.city.as_deref(), geo.region.as_deref(), geo.country.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if !location.is_empty() {
            lines.push(format!("location: {}", location.join(", ")));
        }
        if let Some(timezone) = &geo.timezone {
            lines.push(format!("timezone: {}", timezone));
        }
        if let Some(isp) = &geo.isp {
            lines.push(format!("isp: {}", isp));
        }
    }
    lines.push(format!(
        "lookup: dns {} ms, geo {} ms",
        result.timings.dns_ms, result.timings.geo_ms
    ));
    text_response(StatusCode::OK, lines.join("\n") + "\n")
}

fn render_unresolved(
    extraction: &Extraction,
    headers: &HeaderMap,
    peer: SocketAddr,
    wants_json: bool,
) -> Response {
    if wants_json {
        let response = UnresolvedResponse {
            error: UNRESOLVED_MARKER,
            candidate: extraction.candidate.clone(),
            source: extraction.source.map(|source| source.as_str()),
            headers: header_snapshot(headers),
            peer_addr: peer.to_string(),
        };
        return json_response(StatusCode::OK, &response);
    }

    let mut lines = vec![UNRESOLVED_MARKER.to_string(), format!("peer: {}", peer)];
    for (name, value) in header_snapshot(headers) {
        lines.push(format!("{}: {}", name, value));
    }
    text_response(StatusCode::OK, lines.join("\n") + "\n")
}

/// Snapshot of the received headers, lossily stringified for diagnostics.
///
/// Repeated header names are folded into one comma-separated value.
fn header_snapshot(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut snapshot: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = value.to_str().unwrap_or("<non-utf8>").to_string();
        snapshot
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }
    snapshot
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_string(body) {
        Ok(json) => {
            (status, [(header::CONTENT_TYPE, "application/json")], json).into_response()
        }
        Err(e) => {
            log::error!("Failed to serialize response body: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to serialize response".to_string(),
            )
                .into_response()
        }
    }
}

fn text_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}
