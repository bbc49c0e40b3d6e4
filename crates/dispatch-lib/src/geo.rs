//! Great-circle geometry and decimal rounding.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance between two points in kilometres.
///
/// Inputs are not validated; NaN or out-of-range coordinates produce whatever
/// the formula yields.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let d_phi = (to.lat - from.lat).to_radians();
    let d_lambda = (to.lng - from.lng).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round `value` to `places` decimal places.
///
/// Ties are decided on the exact binary value and go to the even digit, so
/// `2.25` rounds to `2.2` while `111.195` (stored just below the tie) rounds
/// to `111.19`.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    let floor = scaled.floor();
    if scaled - floor != 0.5 {
        return scaled.round() / factor;
    }

    // The product may have been rounded onto the tie; its exact error says
    // which side the true value lies on.
    let error = value.mul_add(factor, -scaled);
    let rounded = if error > 0.0 {
        floor + 1.0
    } else if error < 0.0 {
        floor
    } else {
        scaled.round_ties_even()
    };
    rounded / factor
}
