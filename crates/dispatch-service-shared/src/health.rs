//! Health check handlers for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dispatch_lib::SolverDefaults;
use serde::Serialize;

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: ...".
    pub status: String,

    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Effective solver defaults (readiness only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defaults: Option<SolverDefaults>,
}

impl HealthStatus {
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            defaults: None,
        }
    }

    pub fn ready(service: &str, version: &str, defaults: SolverDefaults) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            defaults: Some(defaults),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            defaults: None,
        }
    }
}

/// Liveness probe handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"dispatch-service","version":"0.1.0"}
/// ```
pub async fn health_live(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::alive(state.service(), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Ready once the resolved defaults can actually drive a solve: a positive
/// default capacity and a speed that yields ETAs.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"dispatch-service","version":"0.1.0","defaults":{...}}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = state.service();
    let version = env!("CARGO_PKG_VERSION");
    let defaults = *state.defaults();

    if defaults.max_orders_per_courier <= 0 {
        let status = HealthStatus::not_ready(service, version, "default courier capacity is zero");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }
    if defaults.speed_kmh <= 0.0 {
        let status = HealthStatus::not_ready(service, version, "default speed is not positive");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response();
    }

    let status = HealthStatus::ready(service, version, defaults);
    (StatusCode::OK, Json(status)).into_response()
}
