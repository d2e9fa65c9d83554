//! Enrichment resolvers.
//!
//! The two lookup backends behind the enrichment pipeline: reverse DNS
//! (PTR records via hickory) and geolocation (one HTTP call to an
//! ip-api style endpoint). Both sit behind object-safe async traits so the
//! orchestrator takes them by injection and tests can swap in fakes.

mod dns;
mod geo;

pub use dns::PtrResolver;
pub use geo::{GeoApiClient, GeoRecord};

use std::net::IpAddr;

use async_trait::async_trait;

use crate::error_handling::ResolverError;

/// Reverse-DNS lookup seam.
#[async_trait]
pub trait ReverseDnsLookup: Send + Sync {
    /// Resolves an IP to its first PTR name.
    ///
    /// Implementations carry no wall-clock deadline of their own; the caller
    /// owns cancellation.
    async fn reverse_lookup(&self, ip: IpAddr) -> Result<String, ResolverError>;
}

/// Geolocation lookup seam.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Resolves an IP to a geolocation record.
    ///
    /// Implementations answer within the hard geolocation deadline;
    /// exceeding it is reported as [`ResolverError::Timeout`] regardless of
    /// what the backend eventually says.
    async fn lookup(&self, ip: IpAddr) -> Result<GeoRecord, ResolverError>;
}
