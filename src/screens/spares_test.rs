use super::*;
use crate::net::test_support::{MockTransport, signed_in, signed_out};
use crate::screens::Redirect;
use reqwest::Method;
use serde_json::{Value, json};

const JOB: &str = "J-42";

fn item(id: Option<&str>, name: &str) -> SparesItem {
    SparesItem {
        id: id.map(ToOwned::to_owned),
        item_name: name.to_owned(),
        awb_number: "AWB1".into(),
        pcs: 4,
        weight: 12.5,
        airline_flight: "QR654".into(),
        remarks: "x".into(),
    }
}

fn body_len(body: Option<&Value>) -> usize {
    body.and_then(Value::as_array).map_or(0, Vec::len)
}

#[tokio::test]
async fn save_partitions_into_one_post_and_one_put() {
    let mock = MockTransport::new();
    mock.ok(Method::POST, SPARES_PATH, json!({ "success": true }));
    mock.ok(Method::PUT, SPARES_PATH, json!({ "success": true }));
    mock.ok(Method::GET, SPARES_PATH, json!([]));
    let mut editor = ShipSparesEditor::new(signed_in(&mock), JOB);
    let rows = vec![item(None, "Gasket"), item(Some("9"), "Filter"), item(None, "Valve")];

    assert_eq!(editor.save(&rows).await, Ok(true));

    let requests = mock.requests();
    let posts: Vec<_> = requests.iter().filter(|r| r.method == Method::POST).collect();
    let puts: Vec<_> = requests.iter().filter(|r| r.method == Method::PUT).collect();
    assert_eq!(posts.len(), 1);
    assert_eq!(puts.len(), 1);
    assert_eq!(body_len(posts[0].json_body()), 2);
    assert_eq!(body_len(puts[0].json_body()), 1);

    let methods: Vec<&Method> = requests.iter().map(|r| &r.method).collect();
    assert_eq!(methods, vec![&Method::POST, &Method::PUT, &Method::GET]);
}

#[tokio::test]
async fn save_sends_backend_field_names() {
    let mock = MockTransport::new();
    mock.ok(Method::POST, SPARES_PATH, json!({ "success": true }));
    mock.ok(Method::GET, SPARES_PATH, json!([]));
    let mut editor = ShipSparesEditor::new(signed_in(&mock), JOB);

    editor.save(&[item(None, "Gasket")]).await.unwrap();

    let post = &mock.requests()[0];
    assert_eq!(
        post.json_body(),
        Some(&json!([{ "job_id": JOB, "iteamName": "Gasket", "awbNumber": "AWB1", "qty": 4, "Weight": 12.5, "arraival": "QR654", "remarks": "x" }]))
    );
    assert_eq!(mock.count(&Method::PUT), 0);
}

#[tokio::test]
async fn failed_create_skips_update() {
    let mock = MockTransport::new();
    mock.respond(Method::POST, SPARES_PATH, 400, json!({ "message": "awbNumber is required" }));
    let mut editor = ShipSparesEditor::new(signed_in(&mock), JOB);

    assert_eq!(editor.save(&[item(None, "Gasket"), item(Some("1"), "Filter")]).await, Ok(false));
    assert_eq!(mock.count(&Method::PUT), 0);
    assert_eq!(editor.toasts.last().map(|t| t.message.as_str()), Some("awbNumber is required"));
}

#[tokio::test]
async fn invalid_row_sends_nothing() {
    let mock = MockTransport::new();
    let mut editor = ShipSparesEditor::new(signed_in(&mock), JOB);

    assert_eq!(editor.save(&[item(None, "")]).await, Ok(false));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn load_maps_to_editor_rows() {
    let mock = MockTransport::new();
    mock.ok(
        Method::GET,
        SPARES_PATH,
        json!({ "data": [{ "id": 9, "iteamName": "Gasket", "awbNumber": "AWB1", "qty": "4", "Weight": "12.5", "arraival": "QR654", "remarks": "x" }] }),
    );
    let mut editor = ShipSparesEditor::new(signed_in(&mock), JOB);

    assert_eq!(editor.load().await, Ok(true));
    assert_eq!(editor.items.items(), &[item(Some("9"), "Gasket")]);
}

#[tokio::test]
async fn load_without_token_redirects() {
    let mock = MockTransport::new();
    let mut editor = ShipSparesEditor::new(signed_out(&mock), JOB);

    assert_eq!(editor.load().await, Err(Redirect::login()));
    assert!(mock.requests().is_empty());
}
