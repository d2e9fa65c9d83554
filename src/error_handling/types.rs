//! Error type definitions.
//!
//! This module defines all error and info types used throughout the service.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),

    /// Error binding the HTTP listener.
    #[error("Listener initialization error: {0}")]
    ListenerError(#[from] std::io::Error),
}

/// Error types for enrichment lookups.
///
/// One taxonomy covers both resolvers: timeouts and lookup failures on the
/// reverse-DNS side; timeouts, transport failures, and application-level
/// failures on the geolocation side. Application failures (a 2xx body whose
/// status field says "fail") are kept distinct from transport failures
/// because they mean the backend understood the request and rejected it,
/// e.g. for a private-range IP.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// The lookup exceeded its deadline.
    #[error("lookup timed out after {0} ms")]
    Timeout(u64),

    /// The reverse-DNS query failed or returned no PTR record.
    #[error("reverse DNS lookup failed: {0}")]
    Lookup(String),

    /// The geolocation call failed below the application level
    /// (connection errors, non-2xx statuses, undecodable bodies).
    #[error("geolocation transport error: {0}")]
    Transport(String),

    /// The geolocation backend answered 2xx but reported a failure.
    #[error("geolocation backend reported failure: {0}")]
    Api(String),
}

/// Types of errors that can occur while serving a lookup.
///
/// This enum categorizes actual failure conditions. Every one of these is
/// absorbed into a degraded response; none of them fails the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Reverse-DNS errors
    DnsTimeout,
    DnsLookupError,
    // Geolocation errors
    GeoTimeout,
    GeoTransportError,
    GeoApiFailure,
    // Cache errors (write-back only; a failed read is indistinguishable
    // from a miss and is tracked as one)
    CacheWriteError,
}

/// Types of informational metrics tracked while serving lookups.
///
/// Info metrics record notable but non-failure events: cache outcomes,
/// extraction fallbacks, and malformed cache payloads that were demoted
/// to misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    // Cache outcomes
    DnsCacheHit,
    DnsCacheMiss,
    GeoCacheHit,
    GeoCacheMiss,
    MalformedCacheEntry, // payload failed to deserialize; treated as a miss
    // Extraction outcomes
    PeerFallback,     // no candidate header; peer socket address used
    ExtractionFailed, // winning candidate did not parse as an IP
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable string representation of the error type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::DnsTimeout => "DNS lookup timeout",
            ErrorType::DnsLookupError => "DNS lookup error",
            ErrorType::GeoTimeout => "Geolocation timeout",
            ErrorType::GeoTransportError => "Geolocation transport error",
            ErrorType::GeoApiFailure => "Geolocation API failure",
            ErrorType::CacheWriteError => "Cache write error",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::DnsCacheHit => "DNS cache hit",
            InfoType::DnsCacheMiss => "DNS cache miss",
            InfoType::GeoCacheHit => "Geolocation cache hit",
            InfoType::GeoCacheMiss => "Geolocation cache miss",
            InfoType::MalformedCacheEntry => "Malformed cache entry",
            InfoType::PeerFallback => "Peer address fallback",
            InfoType::ExtractionFailed => "Client IP extraction failed",
        }
    }
}
