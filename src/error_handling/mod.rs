//! Error handling and lookup statistics.
//!
//! This module provides:
//! - Error type definitions and categorization
//! - Lookup statistics tracking (errors and info metrics)
//!
//! Error types are categorized into:
//! - **Errors**: Lookup failures that degraded a response
//! - **Info**: Informational metrics (cache outcomes, extraction fallbacks)
//!
//! Nothing in here escalates: every categorized failure is absorbed into a
//! partial response, never into a failed request.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_dns_error, categorize_geo_error, record_dns_error, record_geo_error,
};
pub use stats::LookupStats;
pub use types::{ErrorType, InfoType, InitializationError, ResolverError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_lookup_stats_initialization() {
        let stats = LookupStats::new();
        // All error types should be initialized to 0
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        // All info types should be initialized to 0
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_lookup_stats_increment() {
        let stats = LookupStats::new();
        stats.increment_error(ErrorType::GeoTimeout);
        assert_eq!(stats.get_error_count(ErrorType::GeoTimeout), 1);

        stats.increment_info(InfoType::DnsCacheHit);
        assert_eq!(stats.get_info_count(InfoType::DnsCacheHit), 1);
    }

    #[test]
    fn test_lookup_stats_multiple_increments() {
        let stats = LookupStats::new();
        stats.increment_error(ErrorType::DnsTimeout);
        stats.increment_error(ErrorType::DnsTimeout);
        stats.increment_error(ErrorType::DnsTimeout);
        assert_eq!(stats.get_error_count(ErrorType::DnsTimeout), 3);
    }

    #[test]
    fn test_lookup_stats_totals() {
        let stats = LookupStats::new();
        stats.increment_error(ErrorType::DnsTimeout);
        stats.increment_error(ErrorType::GeoTransportError);
        stats.increment_info(InfoType::GeoCacheMiss);

        assert_eq!(stats.total_errors(), 2);
        assert_eq!(stats.total_info(), 1);
    }

    #[test]
    fn test_lookup_stats_count_snapshots() {
        let stats = LookupStats::new();
        stats.increment_error(ErrorType::CacheWriteError);
        stats.increment_info(InfoType::MalformedCacheEntry);

        let errors = stats.error_counts();
        assert_eq!(errors.get("Cache write error"), Some(&1));
        assert_eq!(errors.get("DNS lookup timeout"), Some(&0));

        let info = stats.info_counts();
        assert_eq!(info.get("Malformed cache entry"), Some(&1));
    }
}
