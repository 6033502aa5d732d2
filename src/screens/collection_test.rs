use super::*;
use crate::net::test_support::{MockTransport, signed_in, signed_out};
use crate::screens::Redirect;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct Row {
    id: u32,
    name: String,
}

impl WireRow for Row {}

fn row(id: u32, name: &str) -> Row {
    Row { id, name: name.to_owned() }
}

#[tokio::test]
async fn load_replaces_items() {
    let mock = MockTransport::new();
    mock.ok(Method::GET, "/service", json!({ "data": [{ "id": 1, "name": "Bunkering" }] }));
    let api = signed_in(&mock);
    let mut toasts = Toasts::default();
    let mut rows = RemoteCollection::<Row>::new();

    assert_eq!(rows.load(&api, &mut toasts, "/service", &[], "Failed").await, Ok(true));

    assert_eq!(rows.items(), &[row(1, "Bunkering")]);
    assert!(!rows.is_loading());
    assert!(toasts.is_empty());
}

#[tokio::test]
async fn failed_load_keeps_previous_items() {
    let mock = MockTransport::new();
    mock.respond(Method::GET, "/service", 500, json!({ "message": "db down" }));
    let api = signed_in(&mock);
    let mut toasts = Toasts::default();
    let mut rows = RemoteCollection::new();
    rows.set_items(vec![row(1, "Bunkering")]);

    assert_eq!(rows.load(&api, &mut toasts, "/service", &[], "Failed to load services").await, Ok(false));

    assert_eq!(rows.items().len(), 1);
    assert_eq!(rows.error(), Some("db down"));
    assert_eq!(toasts.last().map(|t| t.message.as_str()), Some("db down"));
}

#[tokio::test]
async fn load_without_token_redirects() {
    let mock = MockTransport::new();
    let api = signed_out(&mock);
    let mut toasts = Toasts::default();
    let mut rows = RemoteCollection::<Row>::new();

    assert_eq!(rows.load(&api, &mut toasts, "/service", &[], "Failed").await, Err(Redirect::login()));
    assert!(mock.requests().is_empty());
}

#[test]
fn local_edits() {
    let mut rows = RemoteCollection::new();
    rows.set_items(vec![row(1, "a"), row(2, "b"), row(3, "b")]);

    assert!(rows.replace_where(|r| r.id == 1, row(1, "z")));
    assert!(!rows.replace_where(|r| r.id == 9, row(9, "q")));
    assert_eq!(rows.remove_where(|r| r.name == "b"), 2);
    assert_eq!(rows.items(), &[row(1, "z")]);
    assert_eq!(rows.filtered(|_| true).len(), 1);
}
