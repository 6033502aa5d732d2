use super::*;
use serde_json::json;

// =============================================================
// list_items
// =============================================================

#[test]
fn list_items_bare_array() {
    assert_eq!(list_items(json!([1, 2])), Some(vec![json!(1), json!(2)]));
}

#[test]
fn list_items_data_envelope() {
    assert_eq!(list_items(json!({ "success": true, "data": [1] })), Some(vec![json!(1)]));
}

#[test]
fn list_items_nested_rows() {
    assert_eq!(list_items(json!({ "data": { "rows": [3] } })), Some(vec![json!(3)]));
    assert_eq!(list_items(json!({ "items": [4] })), Some(vec![json!(4)]));
}

#[test]
fn list_items_malformed_is_none() {
    assert_eq!(list_items(json!({ "data": "oops" })), None);
    assert_eq!(list_items(json!(null)), None);
}

// =============================================================
// unwrap_data / reports_failure
// =============================================================

#[test]
fn unwrap_data_passes_bare_objects_through() {
    assert_eq!(unwrap_data(json!({ "id": 1 })), json!({ "id": 1 }));
    assert_eq!(unwrap_data(json!({ "data": { "id": 1 } })), json!({ "id": 1 }));
}

#[test]
fn reports_failure_only_on_explicit_false() {
    assert!(reports_failure(&json!({ "success": false })));
    assert!(!reports_failure(&json!({ "success": true })));
    assert!(!reports_failure(&json!([])));
}

// =============================================================
// extract_message
// =============================================================

#[test]
fn extract_message_prefers_body() {
    let msg = extract_message(r#"{"message":"Vendor not found"}"#, "Not Found", "Failed");
    assert_eq!(msg, "Vendor not found");
}

#[test]
fn extract_message_reads_error_key() {
    assert_eq!(extract_message(r#"{"error":"bad input"}"#, "Bad Request", "Failed"), "bad input");
    assert_eq!(extract_message(r#"{"error":{"message":"nested"}}"#, "", "Failed"), "nested");
}

#[test]
fn extract_message_falls_back_to_status_text() {
    assert_eq!(extract_message("<html>", "Bad Gateway", "Failed"), "Bad Gateway");
}

#[test]
fn extract_message_final_fallback() {
    assert_eq!(extract_message("", "", "Failed to save"), "Failed to save");
}

// =============================================================
// upload_url
// =============================================================

#[test]
fn upload_url_shapes() {
    assert_eq!(upload_url(&json!({ "url": "https://cdn/x.pdf" })).as_deref(), Some("https://cdn/x.pdf"));
    assert_eq!(upload_url(&json!({ "data": { "fileUrl": "https://cdn/y.pdf" } })).as_deref(), Some("https://cdn/y.pdf"));
    assert_eq!(upload_url(&json!({ "success": true })), None);
}
