use super::*;

#[test]
fn user_reads_status_string() {
    let user: User = serde_json::from_value(serde_json::json!({
        "id": 3, "name": "Ravi", "email": "ravi@example.com", "status": "inactive"
    }))
    .unwrap();
    assert_eq!(user.id, "3");
    assert!(!user.is_active);
    assert_eq!(user.status_label(), "inactive");
}

#[test]
fn user_prefers_explicit_flag() {
    let user: User = serde_json::from_value(serde_json::json!({
        "user_id": "u-1", "name": "Ravi", "email": "", "is_active": true, "status": "inactive"
    }))
    .unwrap();
    assert_eq!(user.id, "u-1");
    assert!(user.is_active);
}

#[test]
fn user_defaults_to_active() {
    let user: User = serde_json::from_value(serde_json::json!({ "id": 1, "name": "A" })).unwrap();
    assert!(user.is_active);
    assert_eq!(user.role, None);
}

#[test]
fn user_serialized_form_reads_back() {
    let user = User {
        id: "9".to_owned(),
        name: "Kim".to_owned(),
        email: "kim@example.com".to_owned(),
        role: Some("ops".to_owned()),
        is_active: false,
    };
    let back: User = serde_json::from_value(serde_json::to_value(&user).unwrap()).unwrap();
    assert_eq!(back, user);
}

#[test]
fn user_form_rejects_short_password() {
    let form = UserForm {
        name: "Kim".to_owned(),
        email: "kim@example.com".to_owned(),
        password: "abc".to_owned(),
        role: None,
    };
    assert!(form.validate().is_err());
}

#[test]
fn user_form_api_defaults_role() {
    let form = UserForm {
        name: " Kim ".to_owned(),
        email: "kim@example.com".to_owned(),
        password: "secret1".to_owned(),
        role: None,
    };
    assert_eq!(form.to_api()["role"], "staff");
    assert_eq!(form.to_api()["name"], "Kim");
}

#[test]
fn user_with_every_id_key_reads() {
    let user: User = serde_json::from_value(serde_json::json!({
        "_id": "m-1", "user_id": "u-1", "id": "1", "name": "Ravi", "isActive": false, "status": "active"
    }))
    .unwrap();
    assert_eq!(user.id, "1");
    assert!(!user.is_active);
}

#[test]
fn user_falls_back_through_id_keys() {
    let user: User =
        serde_json::from_value(serde_json::json!({ "id": null, "_id": "m-1", "name": "Ravi", "is_active": null })).unwrap();
    assert_eq!(user.id, "m-1");
    assert!(user.is_active);
}
