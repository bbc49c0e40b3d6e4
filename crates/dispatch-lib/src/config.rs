//! Solver defaults and their resolution from the environment.

use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// Fallback location used when a courier or order has no coordinates
/// (Guatemala City).
pub const DEFAULT_DEPOT: GeoPoint = GeoPoint::new(14.6349, -90.5069);

/// Average city speed for motorcycle couriers.
pub const DEFAULT_SPEED_KMH: f64 = 25.0;

/// Capacity assumed for couriers whose record carries none.
pub const DEFAULT_MAX_ORDERS_PER_COURIER: i64 = 5;

/// Upper bound on solver rounds.
pub const DEFAULT_MAX_ROUNDS: usize = 100;

pub const ENV_DEPOT_LAT: &str = "DISPATCH_DEPOT_LAT";
pub const ENV_DEPOT_LNG: &str = "DISPATCH_DEPOT_LNG";
pub const ENV_SPEED_KMH: &str = "DISPATCH_SPEED_KMH";
pub const ENV_MAX_ORDERS_PER_COURIER: &str = "DISPATCH_MAX_ORDERS_PER_COURIER";
pub const ENV_MAX_ROUNDS: &str = "DISPATCH_MAX_ROUNDS";

/// Process-wide defaults applied to requests that omit a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolverDefaults {
    pub depot: GeoPoint,
    pub speed_kmh: f64,
    pub max_orders_per_courier: i64,
    pub max_rounds: usize,
}

impl Default for SolverDefaults {
    fn default() -> Self {
        Self {
            depot: DEFAULT_DEPOT,
            speed_kmh: DEFAULT_SPEED_KMH,
            max_orders_per_courier: DEFAULT_MAX_ORDERS_PER_COURIER,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl SolverDefaults {
    /// Read defaults from `DISPATCH_*` environment variables.
    ///
    /// Unset variables keep the built-in default; set but unparsable values
    /// are an error so a misconfigured deployment fails at startup.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`SolverDefaults::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();

        let depot_lat: f64 = setting(&lookup, ENV_DEPOT_LAT, base.depot.lat)?;
        let depot_lng: f64 = setting(&lookup, ENV_DEPOT_LNG, base.depot.lng)?;
        let speed_kmh: f64 = setting(&lookup, ENV_SPEED_KMH, base.speed_kmh)?;
        let max_orders_per_courier: i64 = setting(
            &lookup,
            ENV_MAX_ORDERS_PER_COURIER,
            base.max_orders_per_courier,
        )?;
        let max_rounds: usize = setting(&lookup, ENV_MAX_ROUNDS, base.max_rounds)?;

        for (name, value) in [
            (ENV_DEPOT_LAT, depot_lat),
            (ENV_DEPOT_LNG, depot_lng),
            (ENV_SPEED_KMH, speed_kmh),
        ] {
            if !value.is_finite() {
                return Err(Error::SettingOutOfRange {
                    name: name.to_string(),
                    expected: "a finite number",
                    value: value.to_string(),
                });
            }
        }

        if max_rounds == 0 {
            return Err(Error::SettingOutOfRange {
                name: ENV_MAX_ROUNDS.to_string(),
                expected: "at least 1",
                value: max_rounds.to_string(),
            });
        }

        Ok(Self {
            depot: GeoPoint::new(depot_lat, depot_lng),
            speed_kmh,
            max_orders_per_courier,
            max_rounds,
        })
    }
}

fn setting<T, F>(lookup: &F, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| Error::InvalidSetting {
            name: name.to_string(),
            value: raw,
        }),
    }
}

/// Fully resolved parameters for one solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveSettings {
    pub depot: GeoPoint,
    pub speed_kmh: f64,
    pub default_capacity: i64,
    pub max_rounds: usize,
}

impl From<&SolverDefaults> for SolveSettings {
    fn from(defaults: &SolverDefaults) -> Self {
        Self {
            depot: defaults.depot,
            speed_kmh: defaults.speed_kmh,
            default_capacity: defaults.max_orders_per_courier,
            max_rounds: defaults.max_rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn unset_variables_keep_defaults() {
        let defaults = SolverDefaults::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(defaults, SolverDefaults::default());
        assert_eq!(defaults.depot, DEFAULT_DEPOT);
        assert_eq!(defaults.max_rounds, 100);
    }

    #[test]
    fn variables_override_defaults() {
        let defaults = SolverDefaults::from_lookup(lookup_from(&[
            (ENV_DEPOT_LAT, "10.0"),
            (ENV_DEPOT_LNG, " -75.0 "),
            (ENV_SPEED_KMH, "30"),
            (ENV_MAX_ORDERS_PER_COURIER, "8"),
            (ENV_MAX_ROUNDS, "20"),
        ]))
        .unwrap();
        assert_eq!(defaults.depot, GeoPoint::new(10.0, -75.0));
        assert_eq!(defaults.speed_kmh, 30.0);
        assert_eq!(defaults.max_orders_per_courier, 8);
        assert_eq!(defaults.max_rounds, 20);
    }

    #[test]
    fn unparsable_variable_is_an_error() {
        let err = SolverDefaults::from_lookup(lookup_from(&[(ENV_SPEED_KMH, "fast")])).unwrap_err();
        assert!(err.to_string().contains(ENV_SPEED_KMH));
        assert!(err.to_string().contains("fast"));
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let err = SolverDefaults::from_lookup(lookup_from(&[(ENV_MAX_ROUNDS, "0")])).unwrap_err();
        assert!(matches!(err, Error::SettingOutOfRange { .. }));
    }

    #[test]
    fn non_finite_depot_is_rejected() {
        let err = SolverDefaults::from_lookup(lookup_from(&[(ENV_DEPOT_LAT, "inf")])).unwrap_err();
        assert!(matches!(err, Error::SettingOutOfRange { .. }));
    }

    #[test]
    fn settings_from_defaults() {
        let settings = SolveSettings::from(&SolverDefaults::default());
        assert_eq!(settings.default_capacity, DEFAULT_MAX_ORDERS_PER_COURIER);
        assert_eq!(settings.speed_kmh, DEFAULT_SPEED_KMH);
    }
}
