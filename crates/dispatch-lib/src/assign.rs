//! Round-robin nearest-order assignment.
//!
//! Couriers are visited in a fixed order, and each courier with room claims
//! the remaining order closest to where it currently stands. A courier that
//! claims an order is then treated as standing at that order, so its next
//! claim is measured from there. One claim per courier per round means no
//! courier gets a second order while another eligible courier got nothing in
//! the same round.
//!
//! The loop is driven as a small state machine: [`AssignmentEngine::step`]
//! runs one round and reports whether the solve is still
//! [`SolveState::Running`] or has halted, and why. Every halt is a normal
//! outcome.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::eta::estimate_minutes;
use crate::fleet::Courier;
use crate::geo::round_to;
use crate::input::RecordId;
use crate::orders::{Order, OrderPool};

/// One order handed to one courier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub order_id: RecordId,
    #[serde(rename = "moto_id")]
    pub courier_id: RecordId,
    #[serde(rename = "moto_plate")]
    pub courier_label: String,
    /// Leg distance from the courier's previous position, three decimals.
    pub distance_km: f64,
    /// Minutes for the leg, one decimal; `null` when speed is non-positive.
    pub eta_min: Option<f64>,
    pub order_address: String,
}

/// Why the solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HaltReason {
    /// Every order was claimed.
    PoolEmpty,
    /// Orders remain but every courier is full.
    CapacityExhausted,
    /// A full round passed without a single claim.
    NoProgress,
    /// The round guard was reached.
    RoundLimit,
}

impl HaltReason {
    pub fn as_str(self) -> &'static str {
        match self {
            HaltReason::PoolEmpty => "pool_empty",
            HaltReason::CapacityExhausted => "capacity_exhausted",
            HaltReason::NoProgress => "no_progress",
            HaltReason::RoundLimit => "round_limit",
        }
    }
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveState {
    Running,
    Halted(HaltReason),
}

/// Result of driving an [`AssignmentEngine`] to completion.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutcome {
    /// Assignments in creation order.
    pub assignments: Vec<Assignment>,
    pub halt: HaltReason,
    /// Rounds started.
    pub rounds: usize,
}

/// Request-scoped solver over an exclusively borrowed fleet and pool.
#[derive(Debug)]
pub struct AssignmentEngine<'a> {
    couriers: &'a mut [Courier],
    pool: &'a mut OrderPool,
    speed_kmh: f64,
    max_rounds: usize,
    round: usize,
    state: SolveState,
    assignments: Vec<Assignment>,
}

impl<'a> AssignmentEngine<'a> {
    pub fn new(
        couriers: &'a mut [Courier],
        pool: &'a mut OrderPool,
        speed_kmh: f64,
        max_rounds: usize,
    ) -> Self {
        Self {
            couriers,
            pool,
            speed_kmh,
            max_rounds,
            round: 0,
            state: SolveState::Running,
            assignments: Vec::new(),
        }
    }

    pub fn state(&self) -> SolveState {
        self.state
    }

    /// Rounds started so far.
    pub fn rounds(&self) -> usize {
        self.round
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Run one round. Once halted, further calls are no-ops.
    pub fn step(&mut self) -> SolveState {
        if self.state != SolveState::Running {
            return self.state;
        }
        if self.pool.is_empty() {
            return self.halt(HaltReason::PoolEmpty);
        }
        if self.round >= self.max_rounds {
            return self.halt(HaltReason::RoundLimit);
        }

        self.round += 1;
        let mut progressed = false;

        for courier in self.couriers.iter_mut() {
            if !courier.has_room() {
                continue;
            }
            let Some((order, distance)) = self.pool.claim_nearest(courier.position) else {
                break;
            };

            let Order {
                id,
                location,
                address,
            } = order;
            trace!(
                round = self.round,
                courier = %courier.id,
                order = %id,
                distance_km = distance,
                "order claimed"
            );

            self.assignments.push(Assignment {
                order_id: id,
                courier_id: courier.id.clone(),
                courier_label: courier.label.clone(),
                distance_km: round_to(distance, 3),
                eta_min: estimate_minutes(distance, self.speed_kmh),
                order_address: address,
            });
            courier.claim_at(location);
            progressed = true;
        }

        if self.pool.is_empty() {
            return self.halt(HaltReason::PoolEmpty);
        }
        if !self.couriers.iter().any(Courier::has_room) {
            let reason = if progressed {
                HaltReason::CapacityExhausted
            } else {
                HaltReason::NoProgress
            };
            return self.halt(reason);
        }
        if !progressed {
            return self.halt(HaltReason::NoProgress);
        }

        SolveState::Running
    }

    /// Step until halted.
    pub fn run(mut self) -> EngineOutcome {
        let halt = loop {
            if let SolveState::Halted(reason) = self.step() {
                break reason;
            }
        };

        EngineOutcome {
            assignments: self.assignments,
            halt,
            rounds: self.round,
        }
    }

    fn halt(&mut self, reason: HaltReason) -> SolveState {
        self.state = SolveState::Halted(reason);
        self.state
    }
}
