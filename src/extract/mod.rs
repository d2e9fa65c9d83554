//! Client IP extraction.
//!
//! Determines "who is calling" from proxy-injected headers, falling back to
//! the peer socket address. Seven candidate headers are consulted in a fixed
//! precedence order; the first one present wins outright, whether or not its
//! value parses. Extraction is total: the worst outcome is a result with no
//! usable address, which callers render as an explicit marker with the raw
//! material attached for diagnosis.

use std::net::IpAddr;

use axum::http::HeaderMap;

use crate::config::{
    HEADER_CF_CONNECTING_IP, HEADER_FORWARDED_FOR, HEADER_X_CLIENT_IP, HEADER_X_CLUSTER_CLIENT_IP,
    HEADER_X_FORWARDED, HEADER_X_FORWARDED_FOR, HEADER_X_REAL_IP, IP_CANDIDATE_HEADERS,
};

/// Where a client address came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSource {
    /// `x-forwarded-for` header
    XForwardedFor,
    /// `x-real-ip` header
    XRealIp,
    /// `x-client-ip` header
    XClientIp,
    /// `cf-connecting-ip` header
    CfConnectingIp,
    /// `x-forwarded` header
    XForwarded,
    /// `forwarded-for` header
    ForwardedFor,
    /// `x-cluster-client-ip` header
    XClusterClientIp,
    /// No candidate header was present; the peer socket address was used
    Connection,
}

impl AddressSource {
    /// Wire name reported in responses: the header name, or `"connection"`
    /// for the peer-socket fallback.
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressSource::XForwardedFor => HEADER_X_FORWARDED_FOR,
            AddressSource::XRealIp => HEADER_X_REAL_IP,
            AddressSource::XClientIp => HEADER_X_CLIENT_IP,
            AddressSource::CfConnectingIp => HEADER_CF_CONNECTING_IP,
            AddressSource::XForwarded => HEADER_X_FORWARDED,
            AddressSource::ForwardedFor => HEADER_FORWARDED_FOR,
            AddressSource::XClusterClientIp => HEADER_X_CLUSTER_CLIENT_IP,
            AddressSource::Connection => "connection",
        }
    }

    fn from_header(name: &str) -> Option<AddressSource> {
        match name {
            HEADER_X_FORWARDED_FOR => Some(AddressSource::XForwardedFor),
            HEADER_X_REAL_IP => Some(AddressSource::XRealIp),
            HEADER_X_CLIENT_IP => Some(AddressSource::XClientIp),
            HEADER_CF_CONNECTING_IP => Some(AddressSource::CfConnectingIp),
            HEADER_X_FORWARDED => Some(AddressSource::XForwarded),
            HEADER_FORWARDED_FOR => Some(AddressSource::ForwardedFor),
            HEADER_X_CLUSTER_CLIENT_IP => Some(AddressSource::XClusterClientIp),
            _ => None,
        }
    }
}

impl std::fmt::Display for AddressSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated client address and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientAddress {
    /// The parsed client IP
    pub ip: IpAddr,
    /// Which header (or fallback) supplied it
    pub source: AddressSource,
}

/// Outcome of client IP extraction.
///
/// `address` is `None` when the winning candidate did not parse as an IP, or
/// when neither a candidate header nor a peer address was available.
/// `candidate` and `source` always describe what was examined, so callers can
/// surface the raw material when no address came out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The validated client address, when one was determined
    pub address: Option<ClientAddress>,
    /// The normalized candidate value that was examined
    pub candidate: Option<String>,
    /// The source that supplied the candidate
    pub source: Option<AddressSource>,
}

/// Extracts the client IP for a request.
///
/// Walks the candidate headers in precedence order; the first header present
/// wins. A winning value that does not parse yields no address rather than
/// falling through to a lower-precedence header. With no candidate header at
/// all, the peer socket address is used and tagged `connection`.
///
/// # Arguments
///
/// * `headers` - Request headers (lookups are case-insensitive)
/// * `peer` - Peer socket address, when the transport has one
///
/// # Returns
///
/// An [`Extraction`]. This function never fails and never panics; a request
/// with garbage headers produces an extraction with `address: None`.
pub fn extract_client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> Extraction {
    for name in IP_CANDIDATE_HEADERS {
        let Some(value) = headers.get(*name) else {
            continue;
        };
        let Some(source) = AddressSource::from_header(name) else {
            continue;
        };

        // Non-UTF-8 values normalize to an unparseable empty candidate.
        let raw = value.to_str().unwrap_or("");
        let candidate = normalize_candidate(name, raw);
        let address = candidate
            .parse::<IpAddr>()
            .ok()
            .map(|ip| ClientAddress { ip, source });

        return Extraction {
            address,
            candidate: Some(candidate),
            source: Some(source),
        };
    }

    match peer {
        Some(ip) => Extraction {
            address: Some(ClientAddress {
                ip,
                source: AddressSource::Connection,
            }),
            candidate: Some(ip.to_string()),
            source: Some(AddressSource::Connection),
        },
        None => Extraction {
            address: None,
            candidate: None,
            source: None,
        },
    }
}

/// Applies the per-header normalization quirks.
///
/// - `x-forwarded-for` carries a proxy chain (`client, proxy1, proxy2`);
///   only the first hop is the client, so everything after the first comma
///   is dropped and the remainder trimmed.
/// - `x-real-ip` shows up in the wild with a single leading backslash from
///   over-escaping proxies; exactly one is stripped, and only on this header.
/// - every other header is taken verbatim.
fn normalize_candidate(header: &str, raw: &str) -> String {
    match header {
        HEADER_X_FORWARDED_FOR => raw.split(',').next().unwrap_or(raw).trim().to_string(),
        HEADER_X_REAL_IP => raw.strip_prefix('\\').unwrap_or(raw).to_string(),
        _ => raw.to_string(),
    }
}
