//! Shared builders for the dispatch integration tests.

use std::path::PathBuf;

use dispatch_lib::{AssignmentRequest, CourierRecord, OrderRecord, RecordId};

/// Path to the workspace fixtures directory.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn load_request(name: &str) -> AssignmentRequest {
    let bytes = std::fs::read(fixtures_dir().join(name)).expect("fixture readable");
    AssignmentRequest::from_json_slice(&bytes).expect("fixture decodes")
}

#[allow(dead_code)]
pub fn courier(id: i64, lat: f64, lng: f64, capacity: i64) -> CourierRecord {
    CourierRecord {
        id: Some(RecordId::from(id)),
        latitude: Some(lat),
        longitude: Some(lng),
        max_orders_capacity: Some(capacity),
        ..CourierRecord::default()
    }
}

#[allow(dead_code)]
pub fn order(id: i64, lat: f64, lng: f64) -> OrderRecord {
    OrderRecord {
        id: Some(RecordId::from(id)),
        latitude: Some(lat),
        longitude: Some(lng),
        address: Some(format!("Order {id}")),
    }
}

/// Orders laid out on a deterministic, irregular grid around `(lat, lng)`.
#[allow(dead_code)]
pub fn scattered_orders(count: i64, lat: f64, lng: f64) -> Vec<OrderRecord> {
    (0..count)
        .map(|i| {
            let dlat = ((i * 37) % 23) as f64 * 0.003 - 0.03;
            let dlng = ((i * 53) % 29) as f64 * 0.003 - 0.04;
            order(1000 + i, lat + dlat, lng + dlng)
        })
        .collect()
}

#[allow(dead_code)]
pub fn request(motos: Vec<CourierRecord>, orders: Vec<OrderRecord>) -> AssignmentRequest {
    AssignmentRequest {
        motos,
        orders,
        ..AssignmentRequest::default()
    }
}
