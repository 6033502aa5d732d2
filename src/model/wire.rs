//! Lenient serde helpers for backend fields whose JSON type drifts.
//!
//! The backend sends ids as numbers on some routes and strings on others,
//! quantities as `"4"` or `4`, and booleans as `true`, `1`, or `"completed"`.
//! These helpers accept all of those and never fail a whole row over it.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// =============================================================================
// ROWS
// =============================================================================

/// `(key, aliases)` groups; see [`WireRow::KEY_GROUPS`].
pub type KeyGroups = &'static [(&'static str, &'static [&'static str])];

/// A backend record that may carry one field under several keys at once,
/// such as `{ "_id": .., "id": .. }` from document stores.
pub trait WireRow: DeserializeOwned {
    /// `(key, aliases)` groups in precedence order: the key itself, then each
    /// alias. The first non-null value is kept under `key`.
    const KEY_GROUPS: KeyGroups = &[];
}

impl WireRow for Value {}

/// Collapse every key group of `row` to a single key.
pub fn collapse_keys(row: &mut Value, groups: &[(&str, &[&str])]) {
    let Value::Object(map) = row else {
        return;
    };
    for (key, aliases) in groups {
        let mut winner = map.remove(*key).filter(|v| !v.is_null());
        for alias in *aliases {
            let value = map.remove(*alias).filter(|v| !v.is_null());
            if winner.is_none() {
                winner = value;
            }
        }
        if let Some(value) = winner {
            map.insert((*key).to_owned(), value);
        }
    }
}

/// Deserialize one backend row after collapsing its key groups.
///
/// # Errors
///
/// Returns an error when the row does not fit `T`.
pub fn from_row<T: WireRow>(mut row: Value) -> Result<T, serde_json::Error> {
    collapse_keys(&mut row, T::KEY_GROUPS);
    serde_json::from_value(row)
}

/// Deserialize a nested list that may arrive as an array, a JSON-encoded
/// string, `null`, or junk. Elements that do not fit are skipped.
pub fn rows<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: WireRow,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        Some(Value::Array(items)) => items,
        Some(Value::String(raw)) => match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    Ok(items.into_iter().filter_map(|item| from_row(item).ok()).collect())
}

// =============================================================================
// SCALARS
// =============================================================================

/// Render a scalar JSON value as an id string. `null` and blanks are `None`.
#[must_use]
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Deserialize a required id from a string or number.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| serde::de::Error::custom("expected string or numeric id"))
}

/// Deserialize an optional id from a string, number, or `null`.
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}

/// Deserialize a string that may arrive as `null` or a number.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Deserialize an optional string, mapping blanks to `None`.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = text(deserializer)?;
    Ok(if value.trim().is_empty() { None } else { Some(value) })
}

/// Interpret a JSON value as a truthy flag.
#[must_use]
pub fn flag_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "completed" | "complete" | "done" | "active"
        ),
        _ => false,
    }
}

/// Deserialize a boolean from a bool, number, or status-like string.
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().is_some_and(flag_from_value))
}

/// Deserialize a count from a number or numeric string; junk reads as 0.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Deserialize a measurement from a number or numeric string; junk reads as 0.
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Deserialize a list that may arrive as an array, a comma-separated string,
/// or `null`.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_owned()),
                Value::Number(n) => Some(n.to_string()),
                Value::Object(map) => map
                    .get("service_name")
                    .or_else(|| map.get("name"))
                    .and_then(Value::as_str)
                    .map(|s| s.trim().to_owned()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        _ => Vec::new(),
    })
}

/// Case-insensitive substring match used by every search box.
#[must_use]
pub fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
