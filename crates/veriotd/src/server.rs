//! HTTP server for veriotd

use crate::config::Config;
use crate::metrics::VerifierMetrics;
use crate::registry::DeviceRegistry;
use crate::routes;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    /// Immutable after load; shared without locks.
    pub registry: Arc<DeviceRegistry>,
    pub metrics: VerifierMetrics,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, registry: DeviceRegistry) -> Self {
        let metrics = VerifierMetrics::new();
        metrics.set_registry_size(registry.device_count(), registry.topology_edge_count());
        Self {
            config,
            registry: Arc::new(registry),
            metrics,
            start_time: Instant::now(),
        }
    }
}

/// Build the full router (also used by the route tests)
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::verify_routes())
        .merge(routes::registry_routes())
        .merge(routes::health_routes())
        .merge(routes::metrics_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.server.bind_addr.clone();
    let state = Arc::new(state);

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
