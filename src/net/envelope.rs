//! Response envelope handling.
//!
//! Most routes answer `{ success, data, message }`; some answer a bare array
//! or object. These helpers are pure so every shape can be unit-tested.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde_json::Value;

/// Keys checked, in order, for a human-readable error message.
const MESSAGE_KEYS: [&str; 3] = ["message", "error", "msg"];

/// Keys under which list routes nest their rows.
const LIST_KEYS: [&str; 3] = ["items", "rows", "results"];

const URL_KEYS: [&str; 3] = ["url", "fileUrl", "location"];

/// Parse a body, treating an empty body as `null`.
#[must_use]
pub fn parse_body(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return Some(Value::Null);
    }
    serde_json::from_str(body).ok()
}

/// `{ data: X }` → `X`; anything else is returned as is.
#[must_use]
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or(Value::Null),
        other => other,
    }
}

/// True when the envelope explicitly reports failure.
#[must_use]
pub fn reports_failure(value: &Value) -> bool {
    value.get("success").and_then(Value::as_bool) == Some(false)
}

/// Rows of a list response, or `None` when no list can be found.
#[must_use]
pub fn list_items(value: Value) -> Option<Vec<Value>> {
    match unwrap_data(value) {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => LIST_KEYS.iter().find_map(|key| match map.remove(*key) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        }),
        _ => None,
    }
}

/// Best-effort failure message: server message, else status text, else
/// `fallback`.
#[must_use]
pub fn extract_message(body: &str, status_text: &str, fallback: &str) -> String {
    let from_body = parse_body(body).and_then(|value| {
        MESSAGE_KEYS.iter().find_map(|key| match value.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            Some(Value::Object(inner)) => inner.get("message").and_then(Value::as_str).map(ToOwned::to_owned),
            _ => None,
        })
    });
    from_body
        .or_else(|| Some(status_text.trim().to_owned()).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| fallback.to_owned())
}

/// Public URL from an upload response, wherever the route put it.
#[must_use]
pub fn upload_url(value: &Value) -> Option<String> {
    let find = |v: &Value| {
        URL_KEYS.iter().find_map(|key| v.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()).map(ToOwned::to_owned))
    };
    find(value).or_else(|| value.get("data").and_then(find))
}
