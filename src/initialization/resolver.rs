//! DNS resolver initialization.
//!
//! This module provides functions to initialize the DNS resolver with proper
//! timeout configuration.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;

use crate::config::{DNS_ATTEMPTS, DNS_QUERY_TIMEOUT_MS};
use crate::error_handling::InitializationError;

/// Initializes the DNS resolver used for reverse (PTR) lookups.
///
/// Creates a resolver against the default upstream configuration with
/// per-query timeouts well inside the pipeline deadline, so a slow DNS
/// server degrades one lookup rather than stalling the request.
///
/// # Returns
///
/// A configured `TokioAsyncResolver` wrapped in `Arc` for sharing across
/// requests, or an error if initialization fails.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if the resolver cannot
/// be constructed.
pub fn init_resolver() -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    use hickory_resolver::config::{ResolverConfig, ResolverOpts};

    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_millis(DNS_QUERY_TIMEOUT_MS);
    opts.attempts = DNS_ATTEMPTS;
    // ndots 0 keeps search domains from being appended to PTR queries
    opts.ndots = 0;

    Ok(Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        opts,
    )))
}
