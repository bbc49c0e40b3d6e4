//! Application state for the dispatch service.
//!
//! Handlers only ever read from the state: it holds the solver defaults
//! resolved at startup and the service identity reported by health probes.
//! Every solve builds its own working fleet and order pool.

use std::sync::Arc;

use dispatch_lib::{Error as LibError, SolverDefaults};

/// Service name used when `SERVICE_NAME` is unset.
pub const DEFAULT_SERVICE_NAME: &str = "dispatch-service";

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// A `DISPATCH_*` variable could not be used.
    InvalidConfig(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(e) => write!(f, "invalid solver configuration: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfig(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::InvalidConfig(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheap to clone (`Arc` inside); share it through axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::post, extract::State};
/// use dispatch_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let defaults = state.defaults();
///     // ... solve with defaults
/// }
///
/// let state = AppState::from_env("dispatch-service").unwrap();
/// let app = Router::new()
///     .route("/api/v1/assignments", post(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    defaults: SolverDefaults,
    service: String,
}

impl AppState {
    /// Resolve solver defaults from `DISPATCH_*` environment variables.
    pub fn from_env(service: impl Into<String>) -> Result<Self, AppStateError> {
        let defaults = SolverDefaults::from_env()?;
        tracing::info!(
            depot_lat = defaults.depot.lat,
            depot_lng = defaults.depot.lng,
            speed_kmh = defaults.speed_kmh,
            max_orders_per_courier = defaults.max_orders_per_courier,
            max_rounds = defaults.max_rounds,
            "solver defaults resolved"
        );
        Ok(Self::new(defaults, service))
    }

    /// Create state from already-resolved defaults.
    pub fn new(defaults: SolverDefaults, service: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                defaults,
                service: service.into(),
            }),
        }
    }

    pub fn defaults(&self) -> &SolverDefaults {
        &self.inner.defaults
    }

    /// Name reported by health probes and metric labels.
    pub fn service(&self) -> &str {
        &self.inner.service
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.inner.service)
            .field("defaults", &self.inner.defaults)
            .finish()
    }
}
