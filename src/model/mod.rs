//! Backend view-models and their wire mappings.
//!
//! DESIGN
//! ======
//! One module per entity. Each owns the translation between what the screens
//! edit and what the backend stores, so ad-hoc field coercion never leaks into
//! screen code. The backend stays authoritative; nothing here enforces a
//! lifecycle.

pub mod crew;
pub mod feedback;
pub mod pcs;
pub mod pic;
pub mod port_call;
pub mod spares;
pub mod user;
pub mod vendor;
pub mod vessel;
pub mod wire;

use validator::{ValidateEmail, ValidationError};

/// Email rule for optional form fields: blank means "not given".
///
/// # Errors
///
/// Returns an `email` error when a non-blank value is not an address.
pub fn email_if_present(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_email() { Ok(()) } else { Err(ValidationError::new("email")) }
}
