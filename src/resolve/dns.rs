//! Reverse DNS lookups.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::ResolverError;

use super::ReverseDnsLookup;

/// PTR resolver backed by hickory.
///
/// Returns the first name in the PTR response; resolver ordering is
/// authoritative when an IP maps to several names. The trailing root dot
/// hickory keeps on absolute names is stripped, matching how hostnames are
/// reported everywhere else in the service.
pub struct PtrResolver {
    resolver: Arc<TokioAsyncResolver>,
}

impl PtrResolver {
    /// Wraps an initialized resolver.
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl ReverseDnsLookup for PtrResolver {
    async fn reverse_lookup(&self, ip: IpAddr) -> Result<String, ResolverError> {
        let response = self
            .resolver
            .reverse_lookup(ip)
            .await
            .map_err(|e| ResolverError::Lookup(e.to_string()))?;

        response
            .iter()
            .next()
            .map(|name| {
                let name = name.to_utf8();
                name.strip_suffix('.').unwrap_or(&name).to_string()
            })
            .ok_or_else(|| ResolverError::Lookup(format!("no PTR record for {}", ip)))
    }
}
