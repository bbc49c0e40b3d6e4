//! Pending orders and the pool couriers claim them from.

use tracing::debug;

use crate::geo::GeoPoint;
use crate::input::{OrderRecord, RecordId};

/// A pending order with all fields resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: RecordId,
    pub location: GeoPoint,
    pub address: String,
}

impl Order {
    pub fn new(id: impl Into<RecordId>, location: GeoPoint, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location,
            address: address.into(),
        }
    }
}

/// Resolve raw order records, dropping those without an id.
pub fn normalize_orders(records: &[OrderRecord], depot: GeoPoint) -> Vec<Order> {
    records
        .iter()
        .filter_map(|record| {
            let Some(id) = record.id.clone() else {
                debug!("dropping order record without id");
                return None;
            };
            Some(Order {
                id,
                location: GeoPoint::new(
                    record.latitude.unwrap_or(depot.lat),
                    record.longitude.unwrap_or(depot.lng),
                ),
                address: record.address.clone().unwrap_or_default(),
            })
        })
        .collect()
}

/// Unclaimed orders for one solve.
///
/// The pool only shrinks: each order leaves it exactly once, through
/// [`OrderPool::claim_nearest`].
#[derive(Debug, Clone, Default)]
pub struct OrderPool {
    orders: Vec<Order>,
}

impl OrderPool {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Remove and return the order closest to `point`, with its distance in
    /// kilometres.
    ///
    /// Ties go to the order that comes first in pool order. Returns `None`
    /// once the pool is empty.
    pub fn claim_nearest(&mut self, point: GeoPoint) -> Option<(Order, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (index, order) in self.orders.iter().enumerate() {
            let distance = point.distance_km(&order.location);
            let closer = match best {
                None => true,
                Some((_, best_distance)) => distance < best_distance,
            };
            if closer {
                best = Some((index, distance));
            }
        }

        let (index, distance) = best?;
        Some((self.orders.remove(index), distance))
    }

    /// Ids still in the pool, in pool order.
    pub fn remaining_ids(&self) -> Vec<RecordId> {
        self.orders.iter().map(|o| o.id.clone()).collect()
    }
}
