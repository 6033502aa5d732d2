use super::*;
use crate::model::user::User;
use crate::net::test_support::{MockTransport, signed_in, signed_out};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, PartialEq)]
struct Row {
    #[serde(alias = "_id")]
    id: u32,
}

impl WireRow for Row {
    const KEY_GROUPS: wire::KeyGroups = &[("id", &["_id"])];
}

// =============================================================================
// Auth guard
// =============================================================================

#[tokio::test]
async fn no_token_sends_nothing() {
    let mock = MockTransport::new();
    let api = signed_out(&mock);

    let err = api.get_list::<Row>("/pcs", &[]).await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthenticated));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let mock = MockTransport::new();
    mock.ok(Method::GET, "/pcs", json!([]));
    let api = signed_in(&mock);

    api.get_list::<Row>("/pcs", &[]).await.unwrap();

    assert_eq!(mock.requests()[0].bearer.as_deref(), Some("test-token"));
}

#[tokio::test]
async fn unauthorized_clears_session() {
    let mock = MockTransport::new();
    mock.respond(Method::GET, "/vendor", 401, json!({ "message": "jwt expired" }));
    let api = signed_in(&mock);
    let user = User { id: "7".into(), name: "Ana".into(), email: "ana@example.com".into(), role: None, is_active: true };
    api.session().set_current_user(&user).unwrap();

    let err = api.get_list::<Row>("/vendor", &[]).await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert_eq!(api.session().token().unwrap(), None);
    assert!(api.session().current_user().unwrap().is_none());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn failure_status_carries_server_message() {
    let mock = MockTransport::new();
    mock.respond(Method::POST, "/pcs", 422, json!({ "message": "vendor_id is required" }));
    let api = signed_in(&mock);

    let err = api.post("/pcs", json!({})).await.unwrap_err();

    match err {
        ApiError::Response { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "vendor_id is required");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn success_false_on_ok_status_is_an_error() {
    let mock = MockTransport::new();
    mock.ok(Method::DELETE, "/vendor/3", json!({ "success": false, "message": "in use" }));
    let api = signed_in(&mock);

    let err = api.delete("/vendor/3").await.unwrap_err();

    assert_eq!(err.toast_message("Failed"), "in use");
}

#[tokio::test]
async fn scalar_list_body_degrades_to_empty() {
    let mock = MockTransport::new();
    mock.ok(Method::GET, "/service", Value::String("x".into()));
    let api = signed_in(&mock);

    let rows = api.get_list::<Row>("/service", &[]).await.unwrap();
    assert!(rows.is_empty());
}

// =============================================================================
// Lists
// =============================================================================

#[tokio::test]
async fn list_skips_bad_rows() {
    let mock = MockTransport::new();
    mock.ok(Method::GET, "/pcs", json!({ "success": true, "data": [{ "id": 1 }, { "id": "bad" }, { "id": 3 }] }));
    let api = signed_in(&mock);

    let rows = api.get_list::<Row>("/pcs", &[]).await.unwrap();

    assert_eq!(rows, vec![Row { id: 1 }, Row { id: 3 }]);
}

#[tokio::test]
async fn list_keeps_rows_carrying_both_id_keys() {
    let mock = MockTransport::new();
    mock.ok(Method::GET, "/pcs", json!([{ "_id": 7, "id": 7 }, { "_id": 8 }, { "id": null, "_id": 9 }]));
    let api = signed_in(&mock);

    let rows = api.get_list::<Row>("/pcs", &[]).await.unwrap();

    assert_eq!(rows, vec![Row { id: 7 }, Row { id: 8 }, Row { id: 9 }]);
}

#[tokio::test]
async fn list_sends_query() {
    let mock = MockTransport::new();
    mock.ok(Method::GET, "/crew", json!([]));
    let api = signed_in(&mock);

    api.get_list::<Row>("/crew", &[("job_id", "J-1")]).await.unwrap();

    assert_eq!(mock.requests()[0].query, vec![("job_id".to_owned(), "J-1".to_owned())]);
}

#[tokio::test]
async fn malformed_list_is_empty() {
    let mock = MockTransport::new();
    mock.ok(Method::GET, "/pcs", json!({ "data": null }));
    let api = signed_in(&mock);

    assert!(api.get_list::<Row>("/pcs", &[]).await.unwrap().is_empty());
}

// =============================================================================
// Upload
// =============================================================================

#[tokio::test]
async fn upload_returns_url() {
    let mock = MockTransport::new();
    mock.ok(Method::POST, "/upload", json!({ "data": { "url": "https://files/x.pdf" } }));
    let api = signed_in(&mock);

    let url = api.upload("x.pdf", "application/pdf", b"%PDF".to_vec()).await.unwrap();

    assert_eq!(url, "https://files/x.pdf");
    assert!(matches!(mock.requests()[0].body, super::super::RequestBody::Multipart(_)));
}

#[tokio::test]
async fn upload_without_url_fails() {
    let mock = MockTransport::new();
    mock.ok(Method::POST, "/upload", json!({ "success": true }));
    let api = signed_in(&mock);

    assert!(matches!(api.upload("x.pdf", "application/pdf", Vec::new()).await, Err(ApiError::Parse(_))));
}
