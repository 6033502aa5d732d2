//! Screen models: one explicit state struct per page or dialog.
//!
//! DESIGN
//! ======
//! Every operation returns [`Flow`]. `Err(Redirect)` means the session is
//! gone (no token, or the backend answered `401`) and the caller should send
//! the user to the login route. Every other failure is already reported as a
//! toast on the screen's [`Toasts`] queue and leaves the previous state
//! intact, so callers only ever branch on the redirect.
//!
//! Derived values (filtered lists, completion stats) are recomputed from the
//! state on every call instead of being cached.

pub mod collection;
pub mod crew;
pub mod feedback;
pub mod pic;
pub mod port_call;
pub mod spares;
pub mod toast;
pub mod users;
pub mod vendor;
pub mod vessels;

pub use collection::RemoteCollection;
pub use toast::{Toast, ToastLevel, Toasts};

use validator::Validate;

use crate::error::{ApiError, ValidationError};

pub const LOGIN_ROUTE: &str = "/login";

/// Navigation request produced when the session is missing or expired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub route: &'static str,
}

impl Redirect {
    #[must_use]
    pub fn login() -> Self {
        Self { route: LOGIN_ROUTE }
    }
}

pub type Flow<T> = Result<T, Redirect>;

/// Fold an API result into the screen contract: auth failures redirect,
/// anything else becomes an error toast and `None`.
pub(crate) fn settle<T>(toasts: &mut Toasts, result: Result<T, ApiError>, fallback: &str) -> Flow<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_auth() => Err(Redirect::login()),
        Err(e) => {
            tracing::debug!(error = %e, "operation failed");
            toasts.error(e.toast_message(fallback));
            Ok(None)
        }
    }
}

/// Run schema validation; a failure is toasted and no request should follow.
pub(crate) fn check<F: Validate>(toasts: &mut Toasts, form: &F) -> bool {
    match form.validate() {
        Ok(()) => true,
        Err(errors) => {
            toasts.error(ValidationError::from(errors).to_string());
            false
        }
    }
}

/// Lowercased, trimmed search term; empty means "no filter".
pub(crate) fn needle(search: &str) -> String {
    search.trim().to_lowercase()
}

/// Id of a freshly created record, read from the first of `keys` present.
pub(crate) fn created_id(value: &serde_json::Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| value.get(*key).and_then(crate::model::wire::id_from_value))
}
