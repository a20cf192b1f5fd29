//! API routes for veriotd

use crate::server::AppState;
use crate::verifier;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use veriot_common::{
    DeviceResponse, DevicesResponse, ErrorResponse, HealthResponse, TopologyResponse,
    VerifyRequest, VerifyResponse,
};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Verification Routes
// ============================================================================

pub fn verify_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/verify", post(verify_config))
}

async fn verify_config(
    State(state): State<AppStateArc>,
    Json(req): Json<VerifyRequest>,
) -> Json<VerifyResponse> {
    let start = Instant::now();
    info!("Verifying configuration for type: {}", req.verification_type);

    let response = verifier::verify(&req);

    state.metrics.record_verification(
        &req.verification_type,
        response.result.as_str(),
        start.elapsed().as_secs_f64(),
    );
    info!(
        "Verification {} for type {}: {} errors, {} warnings",
        response.result,
        req.verification_type,
        response.errors.len(),
        response.warnings.len()
    );

    Json(response)
}

// ============================================================================
// Registry Routes
// ============================================================================

pub fn registry_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/topology", get(get_topology))
        .route("/v1/devices", get(get_devices))
        .route("/v1/devices/:device_id", get(get_device))
}

async fn get_topology(State(state): State<AppStateArc>) -> Json<TopologyResponse> {
    Json(TopologyResponse {
        topology: state.registry.topology.clone(),
        devices: state.registry.device_ids(),
        device_count: state.registry.device_count(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

async fn get_devices(State(state): State<AppStateArc>) -> Json<DevicesResponse> {
    Json(DevicesResponse {
        devices: state.registry.devices.clone(),
        device_count: state.registry.device_count(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

async fn get_device(
    State(state): State<AppStateArc>,
    Path(device_id): Path<String>,
) -> Result<Json<DeviceResponse>, (StatusCode, Json<ErrorResponse>)> {
    let device = state.registry.device(&device_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Device {} not found", device_id),
            }),
        )
    })?;

    Ok(Json(DeviceResponse {
        device: device.clone(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.daemon.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        devices_loaded: state.registry.device_count(),
        topology_edges: state.registry.topology_edge_count(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

// ============================================================================
// Metrics Routes
// ============================================================================

pub fn metrics_routes() -> Router<AppStateArc> {
    Router::new().route("/metrics", get(export_metrics))
}

async fn export_metrics(State(state): State<AppStateArc>) -> String {
    state.metrics.export()
}
