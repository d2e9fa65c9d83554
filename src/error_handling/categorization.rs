//! Error categorization.
//!
//! This module maps resolver failures onto counter categories, one mapping
//! per enrichment stream. Both streams share the `ResolverError` taxonomy
//! but count into stream-specific buckets.

use super::stats::LookupStats;
use super::types::{ErrorType, ResolverError};

/// Categorizes a reverse-DNS failure into an `ErrorType`.
pub fn categorize_dns_error(error: &ResolverError) -> ErrorType {
    match error {
        ResolverError::Timeout(_) => ErrorType::DnsTimeout,
        _ => ErrorType::DnsLookupError,
    }
}

/// Categorizes a geolocation failure into an `ErrorType`.
///
/// Application failures keep their own bucket so a backend that rejects a
/// private-range IP is distinguishable from one that is unreachable.
pub fn categorize_geo_error(error: &ResolverError) -> ErrorType {
    match error {
        ResolverError::Timeout(_) => ErrorType::GeoTimeout,
        ResolverError::Api(_) => ErrorType::GeoApiFailure,
        _ => ErrorType::GeoTransportError,
    }
}

/// Updates lookup statistics for a failed reverse-DNS stream.
pub fn record_dns_error(stats: &LookupStats, error: &ResolverError) {
    stats.increment_error(categorize_dns_error(error));
}

/// Updates lookup statistics for a failed geolocation stream.
pub fn record_geo_error(stats: &LookupStats, error: &ResolverError) {
    stats.increment_error(categorize_geo_error(error));
}
