//! Request-level entry points: one call in, one report out.

use serde::Serialize;
use tracing::debug;

use crate::assign::{Assignment, AssignmentEngine, HaltReason};
use crate::config::SolverDefaults;
use crate::eta::{estimate_trip, EtaEstimate};
use crate::fleet::normalize_fleet;
use crate::input::{AssignmentRequest, EtaRequest, RecordId};
use crate::orders::{normalize_orders, OrderPool};
use crate::stats::{summarize, AssignmentStats};

/// Message attached when the request carries no couriers or no orders.
pub const MESSAGE_NOTHING_TO_ASSIGN: &str = "No motos or orders to optimize";

/// Message attached when no courier has available capacity.
pub const MESSAGE_NO_CAPACITY: &str = "No motos with available capacity";

/// Full result of an assignment request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentReport {
    pub assignments: Vec<Assignment>,
    pub stats: AssignmentStats,
    /// Order ids left in the pool, in input order.
    pub unassigned_orders: Vec<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub halt_reason: HaltReason,
    pub rounds: usize,
}

impl AssignmentReport {
    fn without_solve(pool: OrderPool, message: &str) -> Self {
        let halt_reason = if pool.is_empty() {
            HaltReason::PoolEmpty
        } else {
            HaltReason::NoProgress
        };
        Self {
            assignments: Vec::new(),
            stats: summarize(&[], pool.len()),
            unassigned_orders: pool.remaining_ids(),
            message: Some(message.to_string()),
            halt_reason,
            rounds: 0,
        }
    }
}

/// Assign the request's orders to its couriers.
///
/// Builds fresh working state for this call only; nothing is shared with
/// other calls.
pub fn assign_orders(request: &AssignmentRequest, defaults: &SolverDefaults) -> AssignmentReport {
    let settings = request.settings(defaults);
    let mut pool = OrderPool::new(normalize_orders(&request.orders, settings.depot));

    if request.motos.is_empty() || request.orders.is_empty() {
        return AssignmentReport::without_solve(pool, MESSAGE_NOTHING_TO_ASSIGN);
    }

    let mut couriers = normalize_fleet(&request.motos, settings.depot, settings.default_capacity);
    if couriers.is_empty() {
        return AssignmentReport::without_solve(pool, MESSAGE_NO_CAPACITY);
    }

    debug!(
        couriers = couriers.len(),
        orders = pool.len(),
        speed_kmh = settings.speed_kmh,
        "starting assignment solve"
    );

    let outcome = AssignmentEngine::new(
        &mut couriers,
        &mut pool,
        settings.speed_kmh,
        settings.max_rounds,
    )
    .run();

    debug!(
        assigned = outcome.assignments.len(),
        remaining = pool.len(),
        rounds = outcome.rounds,
        halt = %outcome.halt,
        "assignment solve finished"
    );

    AssignmentReport {
        stats: summarize(&outcome.assignments, pool.len()),
        unassigned_orders: pool.remaining_ids(),
        assignments: outcome.assignments,
        message: None,
        halt_reason: outcome.halt,
        rounds: outcome.rounds,
    }
}

/// Distance and ETA between a courier and an order location.
pub fn estimate_eta(request: &EtaRequest, defaults: &SolverDefaults) -> EtaEstimate {
    let speed_kmh = request.speed_kmh.unwrap_or(defaults.speed_kmh);
    estimate_trip(request.origin(), request.destination(), speed_kmh)
}
