//! HTTP header name constants.
//!
//! This module defines the client-IP candidate headers the extractor
//! consults, in precedence order, plus other header names the service reads.

// Client-IP candidate header names
// Matching is case-insensitive; the lowercase forms are canonical here.
/// De-facto standard proxy chain header (client, proxy1, proxy2, ...)
pub const HEADER_X_FORWARDED_FOR: &str = "x-forwarded-for";
/// Single-client header set by nginx-style reverse proxies
pub const HEADER_X_REAL_IP: &str = "x-real-ip";
/// Client IP as seen by some load balancers
pub const HEADER_X_CLIENT_IP: &str = "x-client-ip";
/// Cloudflare's connecting-client header
pub const HEADER_CF_CONNECTING_IP: &str = "cf-connecting-ip";
/// Legacy variant of x-forwarded-for
pub const HEADER_X_FORWARDED: &str = "x-forwarded";
/// Legacy variant of x-forwarded-for
pub const HEADER_FORWARDED_FOR: &str = "forwarded-for";
/// Cluster ingress header (GCP/Kubernetes load balancers)
pub const HEADER_X_CLUSTER_CLIENT_IP: &str = "x-cluster-client-ip";

/// Client-IP candidate headers in precedence order.
///
/// The first header PRESENT on a request wins, whether or not its value
/// parses as an IP; lower-precedence entries are never consulted once an
/// earlier one exists. Requests with none of these fall back to the peer
/// socket address.
///
/// To change precedence, reorder this array.
pub const IP_CANDIDATE_HEADERS: &[&str] = &[
    HEADER_X_FORWARDED_FOR,
    HEADER_X_REAL_IP,
    HEADER_X_CLIENT_IP,
    HEADER_CF_CONNECTING_IP,
    HEADER_X_FORWARDED,
    HEADER_FORWARDED_FOR,
    HEADER_X_CLUSTER_CLIENT_IP,
];

// Other request headers the service reads
/// User-Agent header, feeding the classifier and the tally
pub const HEADER_USER_AGENT: &str = "user-agent";
