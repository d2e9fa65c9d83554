//! HTTP surface of the lookup service.
//!
//! Four routes:
//! - `/` runs the full pipeline; browsers get a text block, tools get JSON
//! - `/json` runs the full pipeline and always answers JSON
//! - `/health` reports liveness and cache readiness
//! - `/stats` reports lookup counters and the user-agent tally

mod handlers;
mod types;

use std::net::SocketAddr;

use anyhow::Context;
use axum::routing::get;
use axum::Router;

use crate::error_handling::InitializationError;

use handlers::{health_handler, lookup_handler, lookup_json_handler, stats_handler};
pub use types::AppState;

/// Builds the service router.
///
/// Routing and state wiring only; [`start_server`] binds the listener
/// around it.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(lookup_handler))
        .route("/json", get(lookup_json_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .with_state(state)
}

/// Binds the listener and serves lookups until the process is stopped.
///
/// # Arguments
///
/// * `bind` - Address to listen on
/// * `port` - Port to listen on
/// * `state` - Shared application state
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server exits
/// abnormally.
pub async fn start_server(bind: &str, port: u16, state: AppState) -> Result<(), anyhow::Error> {
    let app = build_router(state);

    let addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(InitializationError::from)
        .with_context(|| format!("Failed to bind lookup server to {}", addr))?;

    log::info!("Lookup server listening on http://{}/", addr);
    log::info!("  - JSON lookup:  http://{}/json", addr);
    log::info!("  - Health check: http://{}/health", addr);
    log::info!("  - Statistics:   http://{}/stats", addr);

    // The connection fallback needs peer addresses; only the connect-info
    // make-service carries them.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| anyhow::anyhow!("Lookup server error: {}", e))?;

    Ok(())
}
