use super::*;
use validator::Validate;

#[derive(Validate)]
struct ContactForm {
    #[validate(length(min = 1, message = "is required"))]
    name: String,
    #[validate(email)]
    email: String,
}

#[test]
fn toast_message_prefers_server_message() {
    let err = ApiError::Response { status: 422, message: "Vendor already exists".to_owned() };
    assert_eq!(err.toast_message("Failed to save vendor"), "Vendor already exists");
}

#[test]
fn toast_message_falls_back_on_blank_server_message() {
    let err = ApiError::Response { status: 500, message: "  ".to_owned() };
    assert_eq!(err.toast_message("Failed to save vendor"), "Failed to save vendor");
}

#[test]
fn toast_message_falls_back_for_network_errors() {
    let err = ApiError::Request("connection refused".to_owned());
    assert_eq!(err.toast_message("Failed to load"), "Failed to load");
}

#[test]
fn auth_errors_are_flagged() {
    assert!(ApiError::Unauthenticated.is_auth());
    assert!(ApiError::Unauthorized.is_auth());
    assert!(!ApiError::Parse("x".to_owned()).is_auth());
}

#[test]
fn validation_error_names_first_failing_field() {
    let form = ContactForm { name: String::new(), email: "not-an-email".to_owned() };
    let err = ValidationError::from(form.validate().unwrap_err());
    assert_eq!(err.field, "email");
}

#[test]
fn validation_error_uses_custom_message() {
    let form = ContactForm { name: String::new(), email: "ops@example.com".to_owned() };
    let err = ValidationError::from(form.validate().unwrap_err());
    assert_eq!(err.to_string(), "name: is required");
}
