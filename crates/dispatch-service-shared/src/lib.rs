//! Shared infrastructure for the dispatch HTTP service.
//!
//! This crate holds the HTTP glue around `dispatch-lib`:
//!
//! - [`AppState`]: resolved solver defaults shared by every handler
//! - [`health`]: liveness and readiness handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for error responses
//! - [`ServiceResponse`]: wrapper for successful responses with content type
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: structured JSON logging setup
//! - [`middleware`]: request tracking and metrics middleware
//! - [`RequestBody`]: lenient body decoding for each endpoint
//!
//! # Architecture
//!
//! Handlers stay thin; every assignment and ETA decision lives in
//! `dispatch-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Decode request body (lenient)                            │
//! │  - Call dispatch-lib with the shared defaults               │
//! │  - Record metrics                                           │
//! │  - Wrap the result                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides fixtures and a ready-made state for
//! handler testing. Enable the `test-utils` feature to access it from
//! dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingError};
pub use metrics::{
    init_metrics, metrics_handler, record_eta_estimated, record_orders_assigned,
    record_request_rejected, record_solve_completed, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_NOT_FOUND,
};
pub use request::RequestBody;
pub use response::ServiceResponse;
pub use state::{AppState, AppStateError, DEFAULT_SERVICE_NAME};
