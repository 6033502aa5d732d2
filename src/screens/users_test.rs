use super::*;
use crate::net::test_support::{MockTransport, signed_in};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

fn mock_users() -> Arc<MockTransport> {
    let mock = MockTransport::new();
    mock.ok(
        Method::GET,
        "/user",
        json!({ "data": [
            { "id": 1, "name": "Ana Fernando", "email": "ana@portdesk.lk", "role": "admin", "is_active": true },
            { "user_id": "2", "name": "Kasun", "email": "kasun@portdesk.lk", "status": "inactive" }
        ]}),
    );
    mock
}

async fn loaded(mock: &Arc<MockTransport>) -> UsersScreen {
    let mut screen = UsersScreen::new(signed_in(mock));
    screen.load().await.unwrap();
    screen
}

#[tokio::test]
async fn search_by_name_email_or_role() {
    let mock = mock_users();
    let screen = loaded(&mock).await;

    assert_eq!(screen.filtered("").len(), 2);
    assert_eq!(screen.filtered("ADMIN").len(), 1);
    assert_eq!(screen.filtered("kasun@").len(), 1);
}

#[tokio::test]
async fn toggle_flips_local_flag() {
    let mock = mock_users();
    mock.ok(Method::PATCH, "/user/2/toggle-status", json!({ "success": true }));
    let mut screen = loaded(&mock).await;

    assert_eq!(screen.toggle_status("2").await, Ok(true));
    assert!(screen.users.items()[1].is_active);
}

#[tokio::test]
async fn toggle_trusts_reported_state() {
    let mock = mock_users();
    mock.ok(Method::PATCH, "/user/1/toggle-status", json!({ "data": { "is_active": true } }));
    let mut screen = loaded(&mock).await;

    screen.toggle_status("1").await.unwrap();
    assert!(screen.users.items()[0].is_active);
}

#[tokio::test]
async fn create_rejects_short_password() {
    let mock = mock_users();
    let mut screen = loaded(&mock).await;
    let form = UserForm { name: "Dilan".into(), email: "dilan@portdesk.lk".into(), password: "12345".into(), role: None };

    assert_eq!(screen.create(&form).await, Ok(false));
    assert_eq!(mock.count(&Method::POST), 0);
    assert_eq!(screen.toasts.last().map(|t| t.message.as_str()), Some("password: must be at least 6 characters"));
}

#[tokio::test]
async fn create_posts_default_role() {
    let mock = mock_users();
    mock.ok(Method::POST, "/user", json!({ "success": true }));
    let mut screen = loaded(&mock).await;
    let form = UserForm { name: "Dilan".into(), email: "dilan@portdesk.lk".into(), password: "secret1".into(), role: None };

    assert_eq!(screen.create(&form).await, Ok(true));
    let post = mock.requests().into_iter().find(|r| r.method == Method::POST).unwrap();
    assert_eq!(post.json_body().unwrap()["role"], "staff");
}
