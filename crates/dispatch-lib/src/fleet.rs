//! Courier records resolved into per-solve working state.

use tracing::debug;

use crate::geo::GeoPoint;
use crate::input::{CourierRecord, RecordId};

/// Working state for one courier during a single solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Courier {
    pub id: RecordId,
    /// Display label (plate or synthesized name).
    pub label: String,
    /// Where the courier stood when the solve began.
    pub origin: GeoPoint,
    /// Look-ahead point: the last order claimed, or `origin`.
    pub position: GeoPoint,
    /// Orders this courier may still take (total minus in progress).
    pub capacity: usize,
    /// Orders claimed during this solve.
    pub assigned: usize,
}

impl Courier {
    pub fn new(id: RecordId, label: impl Into<String>, origin: GeoPoint, capacity: usize) -> Self {
        Self {
            id,
            label: label.into(),
            origin,
            position: origin,
            capacity,
            assigned: 0,
        }
    }

    /// Whether the courier can claim another order.
    pub fn has_room(&self) -> bool {
        self.assigned < self.capacity
    }

    pub(crate) fn claim_at(&mut self, location: GeoPoint) {
        self.position = location;
        self.assigned += 1;
    }
}

/// Build the working fleet from raw courier records.
///
/// Input order is preserved. Records without an id are dropped, missing
/// coordinates fall back to `depot`, a missing capacity falls back to
/// `default_capacity`, and couriers left with no available capacity are
/// excluded.
pub fn normalize_fleet(
    records: &[CourierRecord],
    depot: GeoPoint,
    default_capacity: i64,
) -> Vec<Courier> {
    records
        .iter()
        .filter_map(|record| {
            let Some(id) = record.id.clone() else {
                debug!("dropping courier record without id");
                return None;
            };

            let total = record.max_orders_capacity.unwrap_or(default_capacity);
            let in_progress = record.current_orders_count.unwrap_or(0);
            let available = total.saturating_sub(in_progress);
            if available <= 0 {
                debug!(courier = %id, available, "courier has no available capacity");
                return None;
            }

            let origin = GeoPoint::new(
                record.latitude.unwrap_or(depot.lat),
                record.longitude.unwrap_or(depot.lng),
            );
            let label = record
                .license_plate
                .clone()
                .unwrap_or_else(|| format!("MOTO-{}", id));
            let capacity = usize::try_from(available).unwrap_or(usize::MAX);

            Some(Courier::new(id, label, origin, capacity))
        })
        .collect()
}
