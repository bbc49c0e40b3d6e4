//! Lenient field decoding for request documents.
//!
//! Callers send numbers as JSON numbers or numeric strings, and records may
//! carry nulls or garbage in optional fields. Every helper here maps an
//! unusable value to `None` (or drops the record) instead of failing the
//! whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::input::RecordId;

/// Coerce a JSON value into a finite float.
pub(crate) fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Coerce a JSON value into an integer, truncating fractional parts.
pub(crate) fn integer(value: &Value) -> Option<i64> {
    if let Value::Number(n) = value {
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
    }
    number(value).map(|v| v.trunc() as i64)
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number))
}

pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(integer))
}

pub(crate) fn lenient_string<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Identifiers must be JSON strings or numbers; anything else reads as absent.
pub(crate) fn record_id<'de, D>(deserializer: D) -> std::result::Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => Some(RecordId::Number(n)),
        Some(Value::String(s)) => Some(RecordId::Text(s)),
        _ => None,
    })
}

/// Decode a list of records, skipping entries that are not objects.
///
/// A missing, null or non-array field yields an empty list.
pub(crate) fn lenient_records<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "skipping undecodable record");
                None
            }
        })
        .collect())
}

/// Decode a whole request document.
///
/// An empty body or a JSON `null` is treated as `{}`; any other non-object
/// value is rejected.
pub(crate) fn document<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    let value: Value = serde_json::from_slice(bytes)?;
    match value {
        Value::Null => Ok(T::default()),
        Value::Object(_) => Ok(serde_json::from_value(value)?),
        Value::Array(_) => Err(Error::NotAnObject { found: "array" }),
        Value::String(_) => Err(Error::NotAnObject { found: "string" }),
        Value::Number(_) => Err(Error::NotAnObject { found: "number" }),
        Value::Bool(_) => Err(Error::NotAnObject { found: "boolean" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_accept_numeric_strings() {
        assert_eq!(number(&json!(1.5)), Some(1.5));
        assert_eq!(number(&json!(" -90.5 ")), Some(-90.5));
        assert_eq!(number(&json!("abc")), None);
        assert_eq!(number(&json!("NaN")), None);
        assert_eq!(number(&json!(true)), None);
        assert_eq!(number(&json!(null)), None);
        assert_eq!(number(&json!({"lat": 1})), None);
    }

    #[test]
    fn integers_truncate_fractions() {
        assert_eq!(integer(&json!(5)), Some(5));
        assert_eq!(integer(&json!(5.9)), Some(5));
        assert_eq!(integer(&json!("7")), Some(7));
        assert_eq!(integer(&json!("3.2")), Some(3));
        assert_eq!(integer(&json!([])), None);
    }
}
