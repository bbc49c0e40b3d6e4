//! Summary metrics over a finished solve.

use std::collections::HashSet;

use serde::Serialize;

use crate::assign::Assignment;
use crate::geo::round_to;

/// Summary of one solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentStats {
    pub total_orders_assigned: usize,
    pub orders_remaining: usize,
    /// Distinct couriers with at least one assignment.
    pub motos_used: usize,
    /// Sum of leg distances, two decimals.
    pub total_distance_km: f64,
    /// Mean leg distance, two decimals; `0` without assignments.
    pub avg_distance_per_order: f64,
}

/// Reduce an assignment list to summary metrics.
pub fn summarize(assignments: &[Assignment], orders_remaining: usize) -> AssignmentStats {
    let total: f64 = assignments.iter().map(|a| a.distance_km).sum();
    let couriers: HashSet<_> = assignments.iter().map(|a| &a.courier_id).collect();
    let average = if assignments.is_empty() {
        0.0
    } else {
        round_to(total / assignments.len() as f64, 2)
    };

    AssignmentStats {
        total_orders_assigned: assignments.len(),
        orders_remaining,
        motos_used: couriers.len(),
        total_distance_km: round_to(total, 2),
        avg_distance_per_order: average,
    }
}
