//! Health Routes
//!
//! - GET /health - Service identity
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (store answers queries)
//! - GET /api/v1/health - Status with crate version

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{ReadinessResponse, ServiceHealth, VersionHealth};
use crate::api::state::AppState;

pub const SERVICE_NAME: &str = "fitlog-api";

/// GET /health
pub async fn service_health() -> Json<ServiceHealth> {
    Json(ServiceHealth {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// GET /api/v1/health
pub async fn version_health() -> Json<VersionHealth> {
    Json(VersionHealth {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 if the record store answers a ping, 503 otherwise.
pub async fn readiness(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let (status, store) = match state.store.ping() {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "error")
        }
    };

    let body = ReadinessResponse {
        status: if status == StatusCode::OK { "ready" } else { "unavailable" }.to_string(),
        store: store.to_string(),
        uptime_seconds: state.uptime_seconds(),
    };
    (status, Json(body))
}
