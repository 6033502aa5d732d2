//! Error types shared by the API client, persistence, and screen models.
//!
//! ERROR HANDLING
//! ==============
//! Failures are deliberately flat. Network errors, non-2xx responses, and
//! unreadable bodies all carry a best-effort message for a toast. Only the
//! two auth cases are distinguished, because screens turn them into a login
//! redirect instead of an inline message.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by [`crate::net::ApiClient`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No bearer token is stored; the request was never sent.
    #[error("not signed in")]
    Unauthenticated,

    /// The backend answered `401`; the stored session has been cleared.
    #[error("session expired")]
    Unauthorized,

    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a failure status or `success: false`.
    #[error("{message}")]
    Response { status: u16, message: String },

    /// The response body could not be read into the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The persistence capability failed while reading the session.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// True for the cases that end the session and send the user to login.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Unauthorized)
    }

    /// Message suitable for a toast, falling back to `fallback` when the
    /// error carries nothing a user could act on.
    #[must_use]
    pub fn toast_message(&self, fallback: &str) -> String {
        match self {
            Self::Response { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Unauthenticated | Self::Unauthorized => "Please sign in again".to_owned(),
            _ => fallback.to_owned(),
        }
    }
}

/// Errors from the key-value persistence capability.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage contents unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Errors from reading [`crate::config::ClientConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing base URL: env var PORTDESK_API_BASE_URL not set")]
    MissingBaseUrl,

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("invalid number in {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },
}

/// A form that failed schema validation before any request was issued.
#[derive(Debug, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        first_failure(&errors).unwrap_or_else(|| Self {
            field: "form".to_owned(),
            message: "is invalid".to_owned(),
        })
    }
}

/// Pick the first failing field in a stable (alphabetical) order, descending
/// into nested structs and list rows.
fn first_failure(errors: &validator::ValidationErrors) -> Option<ValidationError> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        match kind {
            validator::ValidationErrorsKind::Field(list) => {
                let Some(first) = list.first() else {
                    continue;
                };
                let message = first
                    .message
                    .as_ref()
                    .map_or_else(|| first.code.to_string(), ToString::to_string);
                return Some(ValidationError { field: (*field).to_string(), message });
            }
            validator::ValidationErrorsKind::Struct(inner) => {
                if let Some(found) = first_failure(inner) {
                    return Some(found);
                }
            }
            validator::ValidationErrorsKind::List(rows) => {
                for (index, inner) in rows {
                    if let Some(found) = first_failure(inner) {
                        return Some(ValidationError {
                            field: format!("{field}[{index}].{}", found.field),
                            message: found.message,
                        });
                    }
                }
            }
        }
    }
    None
}
