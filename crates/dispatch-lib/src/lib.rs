//! Courier dispatch library entry points.
//!
//! This crate turns a batch of pending delivery orders and a fleet of couriers
//! into an ordered list of assignments using a round-robin nearest-order
//! heuristic, and estimates travel time for single courier/order pairs.
//! Higher-level consumers (CLI, HTTP service) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod assign;
mod coerce;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod eta;
pub mod fleet;
pub mod geo;
pub mod input;
pub mod orders;
pub mod stats;

pub use assign::{Assignment, AssignmentEngine, EngineOutcome, HaltReason, SolveState};
pub use config::{SolveSettings, SolverDefaults};
pub use dispatch::{assign_orders, estimate_eta, AssignmentReport};
pub use error::{Error, Result};
pub use eta::{estimate_minutes, estimate_trip, EtaEstimate};
pub use fleet::{normalize_fleet, Courier};
pub use geo::{haversine_km, GeoPoint};
pub use input::{AssignmentRequest, CourierRecord, EtaRequest, OrderRecord, RecordId};
pub use orders::{normalize_orders, Order, OrderPool};
pub use stats::{summarize, AssignmentStats};
