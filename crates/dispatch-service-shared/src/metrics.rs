//! Prometheus metrics for the dispatch service.
//!
//! - [`MetricsConfig`]: configuration for the metrics system
//! - [`init_metrics`]: install the Prometheus recorder
//! - [`metrics_handler`]: axum handler for the exposition endpoint
//! - business metric helpers for solves and ETA lookups
//!
//! # Example
//!
//! ```no_run
//! use dispatch_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new()
//!     .route(&config.path, get(metrics_handler));
//! ```

use dispatch_lib::HaltReason;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Read `METRICS_ENABLED` (anything but "false" enables) and
    /// `METRICS_PATH`.
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        let path = std::env::var("METRICS_PATH")
            .ok()
            .filter(|p| p.starts_with('/'))
            .unwrap_or_else(|| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Install the Prometheus recorder. Call once at startup.
///
/// # Errors
///
/// Fails when metrics are disabled, when a recorder is already installed, or
/// when the exporter cannot be built.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Returns `None` until [`init_metrics`] has run.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Prometheus exposition text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Count a finished solve under `dispatch_solves_total`, labelled by why the
/// engine halted.
pub fn record_solve_completed(halt: HaltReason, service: &str) {
    metrics::counter!(
        "dispatch_solves_total",
        "halt_reason" => halt.as_str(),
        "service" => service.to_string()
    )
    .increment(1);
}

/// Record per-solve order counts to the `dispatch_orders_assigned` and
/// `dispatch_orders_unassigned` histograms.
pub fn record_orders_assigned(assigned: usize, unassigned: usize) {
    metrics::histogram!("dispatch_orders_assigned").record(assigned as f64);
    metrics::histogram!("dispatch_orders_unassigned").record(unassigned as f64);
}

/// Count an ETA lookup. `outcome` is "estimated", or "no_eta" when the speed
/// did not allow one.
pub fn record_eta_estimated(has_eta: bool, service: &str) {
    let outcome = if has_eta { "estimated" } else { "no_eta" };
    metrics::counter!(
        "dispatch_eta_requests_total",
        "outcome" => outcome,
        "service" => service.to_string()
    )
    .increment(1);
}

/// Count a request rejected before reaching the solver.
pub fn record_request_rejected(endpoint: &str, service: &str) {
    metrics::counter!(
        "dispatch_requests_rejected_total",
        "endpoint" => endpoint.to_string(),
        "service" => service.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_config_default() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.path, "/metrics");
    }

    #[test]
    fn test_metrics_handler_returns_prometheus_format() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let output = rt.block_on(async { metrics_handler().await });

        // Either rendered metrics or the "not initialized" comment.
        assert!(output.contains('#') || output.is_empty());
    }

    #[test]
    fn test_business_metric_helpers_record_without_recorder() {
        record_solve_completed(HaltReason::PoolEmpty, "dispatch");
        record_solve_completed(HaltReason::RoundLimit, "dispatch");
        record_orders_assigned(12, 3);
        record_eta_estimated(true, "dispatch");
        record_eta_estimated(false, "dispatch");
        record_request_rejected("assignments", "dispatch");
    }

    #[test]
    fn test_disabled_metrics_do_not_install() {
        let config = MetricsConfig {
            enabled: false,
            path: "/metrics".to_string(),
        };
        assert!(matches!(init_metrics(&config), Err(MetricsError::Disabled)));
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        assert_eq!(
            MetricsError::AlreadyInitialized.to_string(),
            "metrics recorder already initialized"
        );
        let failed = MetricsError::InstallFailed("test error".to_string());
        assert!(failed.to_string().contains("test error"));
    }
}
