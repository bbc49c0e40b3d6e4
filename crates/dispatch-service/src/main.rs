//! Courier dispatch HTTP service binary.
//!
//! # Configuration
//!
//! - `SERVICE_PORT` - HTTP port (default: 8080; `PORT` is read as a fallback)
//! - `SERVICE_NAME` - name reported by health probes (default: dispatch-service)
//! - `RUST_LOG` - log level (default: info)
//! - `LOG_FORMAT` - log format: json (default) or text
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus exposition
//! - `DISPATCH_DEPOT_LAT`, `DISPATCH_DEPOT_LNG`, `DISPATCH_SPEED_KMH`,
//!   `DISPATCH_MAX_ORDERS_PER_COURIER`, `DISPATCH_MAX_ROUNDS` - solver defaults

use std::env;
use std::net::SocketAddr;

use tracing::{error, info};

use dispatch_service::router;
use dispatch_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, DEFAULT_SERVICE_NAME,
};

fn service_port() -> u16 {
    ["SERVICE_PORT", "PORT"]
        .iter()
        .find_map(|name| env::var(name).ok().and_then(|p| p.trim().parse().ok()))
        .unwrap_or(8080)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env().with_service(DEFAULT_SERVICE_NAME);
    init_logging(&logging_config)?;
    let service = logging_config
        .service
        .clone()
        .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let port = service_port();
    info!(service = %service, port = port, "starting dispatch service");

    let state = AppState::from_env(service).map_err(|e| {
        error!(error = %e, "failed to load application state");
        e
    })?;

    let app = router(state, &metrics_config.path);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("dispatch service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
