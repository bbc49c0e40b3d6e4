//! Test utilities for handler testing.
//!
//! Provides a state with built-in defaults and request fixtures from
//! `docs/fixtures`.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use dispatch_lib::SolverDefaults;

use crate::state::AppState;

/// Directory holding the JSON request fixtures.
pub const TEST_FIXTURE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../docs/fixtures");

/// Service name used by [`test_state`].
pub const TEST_SERVICE_NAME: &str = "dispatch-test";

/// State with the built-in solver defaults.
pub fn test_state() -> AppState {
    AppState::new(SolverDefaults::default(), TEST_SERVICE_NAME)
}

/// State with custom defaults, e.g. a lower round guard.
pub fn test_state_with(defaults: SolverDefaults) -> AppState {
    AppState::new(defaults, TEST_SERVICE_NAME)
}

/// Absolute path to a named fixture.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(TEST_FIXTURE_DIR).join(name)
}

/// Raw bytes of a named fixture.
///
/// # Panics
///
/// Panics if the fixture is missing; that is a test setup problem.
pub fn fixture_bytes(name: &str) -> Vec<u8> {
    let path = fixture_path(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("failed to read fixture {:?}: {}", path, e))
}

/// Fixture names shipped in `docs/fixtures`.
pub mod fixtures {
    /// Mixed courier and order records, including invalid ones.
    pub const ASSIGN_REQUEST: &str = "assign_request.json";

    /// One degree of longitude along the equator at 25 km/h.
    pub const ETA_REQUEST: &str = "eta_request.json";
}

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique request ID for tests.
pub fn test_request_id() -> String {
    format!("test-{}", REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed))
}
