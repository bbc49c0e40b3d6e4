//! Travel-time estimation from great-circle distance and an assumed speed.

use serde::Serialize;

use crate::geo::{round_to, GeoPoint};

/// Estimated minutes to cover `distance_km` at `speed_kmh`, rounded to one
/// decimal place.
///
/// Returns `None` when the speed is zero, negative or NaN: no meaningful time
/// exists for such a speed, but the caller's computation must carry on.
pub fn estimate_minutes(distance_km: f64, speed_kmh: f64) -> Option<f64> {
    if speed_kmh.is_nan() || speed_kmh <= 0.0 {
        return None;
    }
    Some(round_to(distance_km / speed_kmh * 60.0, 1))
}

/// Distance and ETA for a single origin/destination pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EtaEstimate {
    /// Great-circle distance in kilometres, three decimals.
    pub distance_km: f64,
    /// Minutes, one decimal; `null` when the speed is non-positive.
    pub eta_min: Option<f64>,
    /// Speed the estimate was computed with, echoed back.
    pub speed_kmh: f64,
}

/// Estimate the trip from `from` to `to` at `speed_kmh`.
pub fn estimate_trip(from: GeoPoint, to: GeoPoint, speed_kmh: f64) -> EtaEstimate {
    let distance = from.distance_km(&to);
    EtaEstimate {
        distance_km: round_to(distance, 3),
        eta_min: estimate_minutes(distance, speed_kmh),
        speed_kmh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_takes_zero_minutes() {
        assert_eq!(estimate_minutes(0.0, 25.0), Some(0.0));
        assert_eq!(estimate_minutes(0.0, 0.5), Some(0.0));
    }

    #[test]
    fn half_tenth_minutes_round_to_even() {
        // 0.9375 km at 25 km/h = 2.25 minutes
        assert_eq!(estimate_minutes(0.9375, 25.0), Some(2.2));
    }

    #[test]
    fn non_positive_speed_has_no_estimate() {
        assert_eq!(estimate_minutes(10.0, 0.0), None);
        assert_eq!(estimate_minutes(10.0, -5.0), None);
        assert_eq!(estimate_minutes(10.0, f64::NAN), None);
    }

    #[test]
    fn minutes_are_rounded_to_one_decimal() {
        // 10 km at 25 km/h = 24 minutes
        assert_eq!(estimate_minutes(10.0, 25.0), Some(24.0));
        // 1 km at 7 km/h = 8.571... minutes
        assert_eq!(estimate_minutes(1.0, 7.0), Some(8.6));
    }

    #[test]
    fn trip_estimate_rounds_distance_to_metres() {
        let estimate = estimate_trip(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0), 25.0);
        assert_eq!(estimate.distance_km, 111.195);
        // 111.1949.. / 25 * 60 = 266.87..
        assert_eq!(estimate.eta_min, Some(266.9));
        assert_eq!(estimate.speed_kmh, 25.0);
    }

    #[test]
    fn trip_estimate_keeps_distance_without_speed() {
        let estimate = estimate_trip(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0), 0.0);
        assert_eq!(estimate.distance_km, 111.195);
        assert!(estimate.eta_min.is_none());
    }
}
