//! Value parsers for command-line arguments.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use dispatch_lib::GeoPoint;

/// Parse a `LAT,LNG` pair such as `14.6349,-90.5069`.
///
/// Used as a clap `value_parser`, so errors are plain strings.
pub fn parse_point(raw: &str) -> Result<GeoPoint, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG but got '{}'", raw))?;
    let lat = parse_coordinate(lat, "latitude")?;
    let lng = parse_coordinate(lng, "longitude")?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {} is outside -90..=90", lat));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(format!("longitude {} is outside -180..=180", lng));
    }
    Ok(GeoPoint::new(lat, lng))
}

fn parse_coordinate(raw: &str, name: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid {} '{}'", name, raw.trim()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{} must be finite", name))
    }
}

/// Read a request body from a file, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("failed to read request from stdin")?;
        return Ok(buffer);
    }
    std::fs::read(path).with_context(|| format!("failed to read request from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lat_lng_pairs() {
        assert_eq!(
            parse_point("14.6349,-90.5069").unwrap(),
            GeoPoint::new(14.6349, -90.5069)
        );
        assert_eq!(parse_point(" 0 , 1 ").unwrap(), GeoPoint::new(0.0, 1.0));
    }

    #[test]
    fn rejects_malformed_pairs() {
        assert!(parse_point("14.6").unwrap_err().contains("LAT,LNG"));
        assert!(parse_point("north,1").unwrap_err().contains("latitude"));
        assert!(parse_point("1,NaN").unwrap_err().contains("finite"));
        assert!(parse_point("91,0").unwrap_err().contains("outside"));
        assert!(parse_point("0,181").unwrap_err().contains("outside"));
    }

    #[test]
    fn missing_file_has_context() {
        let err = read_input(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
