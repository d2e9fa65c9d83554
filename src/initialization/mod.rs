//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - The logger
//! - The DNS resolver for reverse lookups
//! - The outbound HTTP client for geolocation lookups
//! - The enrichment cache backend
//!
//! Apart from the cache (which degrades to disabled), initialization
//! functions return proper error types for error handling.

mod cache;
mod client;
mod logger;
mod resolver;

// Re-export public API
pub use cache::init_cache;
pub use client::init_geo_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;
