//! Request documents as callers send them.
//!
//! Every field is optional at this layer. Resolution against configured
//! defaults happens once, in [`AssignmentRequest::settings`] and the
//! normalizers in [`crate::fleet`] and [`crate::orders`], so the solver never
//! has to ask whether a field was present.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coerce;
use crate::config::{SolveSettings, SolverDefaults};
use crate::error::Result;
use crate::geo::GeoPoint;

/// Opaque record identifier, echoed back exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value.into())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// Raw courier record (`motos[]` entry).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourierRecord {
    #[serde(default, deserialize_with = "coerce::record_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub longitude: Option<f64>,
    /// Total carrying capacity.
    #[serde(default, deserialize_with = "coerce::lenient_i64")]
    pub max_orders_capacity: Option<i64>,
    /// Orders already in progress.
    #[serde(default, deserialize_with = "coerce::lenient_i64")]
    pub current_orders_count: Option<i64>,
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub license_plate: Option<String>,
}

/// Raw order record (`orders[]` entry).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRecord {
    #[serde(default, deserialize_with = "coerce::record_id")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "coerce::lenient_string")]
    pub address: Option<String>,
}

/// Body of an assignment request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentRequest {
    #[serde(default, deserialize_with = "coerce::lenient_records")]
    pub motos: Vec<CourierRecord>,
    #[serde(default, deserialize_with = "coerce::lenient_records")]
    pub orders: Vec<OrderRecord>,
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub depot_lat: Option<f64>,
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub depot_lng: Option<f64>,
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub speed_kmh: Option<f64>,
    /// Capacity for couriers whose record omits `max_orders_capacity`.
    #[serde(default, deserialize_with = "coerce::lenient_i64")]
    pub max_orders_per_moto: Option<i64>,
}

impl AssignmentRequest {
    /// Decode a request body. See [`EtaRequest::from_json_slice`] for the
    /// rules on empty and non-object bodies.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        coerce::document(bytes)
    }

    /// Resolve per-request overrides against the configured defaults.
    pub fn settings(&self, defaults: &SolverDefaults) -> SolveSettings {
        SolveSettings {
            depot: GeoPoint::new(
                self.depot_lat.unwrap_or(defaults.depot.lat),
                self.depot_lng.unwrap_or(defaults.depot.lng),
            ),
            speed_kmh: self.speed_kmh.unwrap_or(defaults.speed_kmh),
            default_capacity: self
                .max_orders_per_moto
                .unwrap_or(defaults.max_orders_per_courier),
            max_rounds: defaults.max_rounds,
        }
    }
}

/// Body of a single ETA request. Coordinates default to `0`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EtaRequest {
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub moto_lat: Option<f64>,
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub moto_lng: Option<f64>,
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub order_lat: Option<f64>,
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub order_lng: Option<f64>,
    #[serde(default, deserialize_with = "coerce::lenient_f64")]
    pub speed_kmh: Option<f64>,
}

impl EtaRequest {
    /// Decode a request body.
    ///
    /// An empty body or `null` decodes to all-default fields. Bodies that are
    /// valid JSON but not an object are rejected with
    /// [`crate::Error::NotAnObject`].
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        coerce::document(bytes)
    }

    pub fn origin(&self) -> GeoPoint {
        GeoPoint::new(self.moto_lat.unwrap_or(0.0), self.moto_lng.unwrap_or(0.0))
    }

    pub fn destination(&self) -> GeoPoint {
        GeoPoint::new(self.order_lat.unwrap_or(0.0), self.order_lng.unwrap_or(0.0))
    }
}
