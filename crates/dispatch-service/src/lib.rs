//! Courier dispatch HTTP service.
//!
//! Assigns pending orders to couriers and estimates single-trip ETAs over a
//! JSON API. All decisions are made by `dispatch-lib`; this crate only wires
//! the handlers into an axum [`Router`].
//!
//! # Endpoints
//!
//! - `POST /api/v1/assignments` (alias `POST /optimize-assignments`)
//! - `POST /api/v1/eta` (alias `POST /calculate-eta`)
//! - `GET /health`, `GET /health/live`, `GET /health/ready`
//! - `GET /metrics` - Prometheus metrics endpoint (path configurable)
//! - `GET /` - plain-text banner

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use dispatch_lib::{
    assign_orders, estimate_eta, AssignmentReport, AssignmentRequest, EtaEstimate, EtaRequest,
};
use dispatch_service_shared::{
    extract_or_generate_request_id, health_live, health_ready, metrics_handler,
    record_eta_estimated, record_orders_assigned, record_request_rejected, record_solve_completed,
    AppState, MetricsLayer, ProblemDetails, RequestBody, ServiceResponse,
};

/// Plain-text body served at `/`.
pub const BANNER: &str = "Courier Dispatch Service - order assignment and ETA estimation";

/// HTTP response: either success or an RFC 9457 problem.
#[derive(Debug)]
pub enum ApiResponse<T> {
    Success(ServiceResponse<T>),
    Error(ProblemDetails),
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiResponse::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            ApiResponse::Error(problem) => problem.into_response(),
        }
    }
}

/// Build the service router.
///
/// `metrics_path` is where the Prometheus exposition is mounted.
pub fn router(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/api/v1/assignments", post(assignments_handler))
        .route("/optimize-assignments", post(assignments_handler))
        .route("/api/v1/eta", post(eta_handler))
        .route("/calculate-eta", post(eta_handler))
        .route("/health", get(health_live))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .route(metrics_path, get(metrics_handler))
        .fallback(not_found)
        .layer(MetricsLayer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn banner() -> &'static str {
    BANNER
}

/// Handle POST /api/v1/assignments requests.
async fn assignments_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResponse<AssignmentReport> {
    let request_id = extract_or_generate_request_id(&headers);

    let request = match AssignmentRequest::parse(&body, request_id.as_str()) {
        Ok(request) => request,
        Err(problem) => {
            warn!(request_id = %request_id, detail = ?problem.detail, "rejected assignment request");
            record_request_rejected("assignments", state.service());
            return ApiResponse::Error(*problem);
        }
    };

    info!(
        request_id = %request_id,
        motos = request.motos.len(),
        orders = request.orders.len(),
        "handling assignment request"
    );

    let report = assign_orders(&request, state.defaults());

    record_solve_completed(report.halt_reason, state.service());
    record_orders_assigned(report.assignments.len(), report.unassigned_orders.len());

    info!(
        request_id = %request_id,
        assigned = report.stats.total_orders_assigned,
        unassigned = report.stats.orders_remaining,
        motos_used = report.stats.motos_used,
        halt_reason = %report.halt_reason,
        rounds = report.rounds,
        "assignment completed"
    );

    ApiResponse::Success(ServiceResponse::new(report).with_request_id(request_id.as_str()))
}

/// Handle POST /api/v1/eta requests.
async fn eta_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResponse<EtaEstimate> {
    let request_id = extract_or_generate_request_id(&headers);

    let request = match EtaRequest::parse(&body, request_id.as_str()) {
        Ok(request) => request,
        Err(problem) => {
            warn!(request_id = %request_id, detail = ?problem.detail, "rejected eta request");
            record_request_rejected("eta", state.service());
            return ApiResponse::Error(*problem);
        }
    };

    let estimate = estimate_eta(&request, state.defaults());
    record_eta_estimated(estimate.eta_min.is_some(), state.service());

    info!(
        request_id = %request_id,
        distance_km = estimate.distance_km,
        eta_min = ?estimate.eta_min,
        speed_kmh = estimate.speed_kmh,
        "eta estimated"
    );

    ApiResponse::Success(ServiceResponse::new(estimate).with_request_id(request_id.as_str()))
}

async fn not_found(headers: HeaderMap, uri: Uri) -> ProblemDetails {
    let request_id = extract_or_generate_request_id(&headers);
    ProblemDetails::not_found(uri.path(), request_id.as_str())
}
