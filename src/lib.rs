//! origin_lookup library: client IP resolution and enrichment
//!
//! This library answers "who is calling me, and from where?". It extracts the
//! real client IP from proxy-aware request headers, enriches it with reverse
//! DNS and geolocation through a cache-aside pipeline that degrades gracefully
//! when providers are slow or down, and serves the answer over HTTP in a
//! format chosen by the caller's user agent.
//!
//! # Example
//!
//! ```no_run
//! use origin_lookup::{run_service, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     port: 8080,
//!     ..Default::default()
//! };
//!
//! run_service(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod agent;
pub mod cache;
pub mod config;
pub mod enrich;
pub mod error_handling;
pub mod extract;
pub mod initialization;
pub mod resolve;
pub mod server;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use run::run_service;
pub use server::{build_router, start_server, AppState};

// Internal run module (wires shared resources and starts the server)
mod run {
    use std::sync::Arc;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::info;

    use crate::agent::UserAgentTally;
    use crate::config::Config;
    use crate::enrich::{Enricher, EnrichmentSettings};
    use crate::error_handling::LookupStats;
    use crate::initialization::*;
    use crate::resolve::{GeoApiClient, PtrResolver};
    use crate::server::AppState;

    /// Wires shared resources and serves lookups until the process stops.
    ///
    /// This is the main entry point for the library. It initializes the DNS
    /// resolver, the geolocation client, and the enrichment cache, then binds
    /// the HTTP listener and serves the lookup routes.
    ///
    /// # Arguments
    ///
    /// * `config` - Parsed service configuration
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DNS resolver cannot be constructed
    /// - The outbound HTTP client cannot be constructed
    /// - The listener cannot bind
    ///
    /// Cache unavailability is not an error; the service starts with the
    /// cache disabled and every lookup goes to the resolvers.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use origin_lookup::{run_service, Config};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Config::default();
    /// run_service(config).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run_service(config: Config) -> Result<()> {
        let resolver = init_resolver().context("Failed to initialize DNS resolver")?;
        let geo_client =
            init_geo_client().context("Failed to initialize geolocation HTTP client")?;
        let cache = Arc::new(init_cache(&config).await);

        info!(
            "Enrichment cache backend: {} (ready: {})",
            cache.backend(),
            cache.is_ready()
        );

        let stats = Arc::new(LookupStats::new());
        let enricher = Arc::new(Enricher::new(
            Arc::clone(&cache),
            Arc::new(PtrResolver::new(resolver)),
            Arc::new(GeoApiClient::new(geo_client, config.geo_endpoint.clone())),
            EnrichmentSettings::from(&config),
            Arc::clone(&stats),
        ));

        let state = AppState {
            enricher,
            cache,
            tally: Arc::new(UserAgentTally::new(config.max_user_agents)),
            stats,
            start_time: Arc::new(Instant::now()),
        };

        crate::server::start_server(&config.bind, config.port, state).await
    }
}
