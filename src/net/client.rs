//! REST client shared by every screen.
//!
//! DESIGN
//! ======
//! All requests go through [`ApiClient::send`], which owns the three
//! cross-cutting rules: refuse to send without a token, tear the session down
//! on `401`, and fold every other failure into one message-carrying error.
//! Typed helpers on top only differ in how they read the body.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use super::envelope;
use super::transport::{ApiRequest, FilePart, RawResponse, ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::model::wire::{self, WireRow};
use crate::storage::Session;

const UPLOAD_PATH: &str = "/upload";
const UPLOAD_FIELD: &str = "file";

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Session,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, session: Session) -> Self {
        Self { transport, session }
    }

    /// Build a client over the real HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), session))
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// True when a token is stored. Screens check this before loading.
    ///
    /// # Errors
    ///
    /// Returns an error if the persistence capability cannot be read.
    pub fn has_token(&self) -> Result<bool, ApiError> {
        Ok(self.session.token()?.is_some())
    }

    // =========================================================================
    // Core send
    // =========================================================================

    /// Send one request and return the parsed body with its envelope intact.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]. No request is issued when no token is stored.
    pub async fn send(&self, mut request: ApiRequest) -> Result<Value, ApiError> {
        let Some(token) = self.session.token()? else {
            debug!(path = %request.path, "no token stored; request not sent");
            return Err(ApiError::Unauthenticated);
        };
        request.bearer = Some(token);

        let method = request.method.clone();
        let path = request.path.clone();
        debug!(method = %method, path = %path, "api request");

        let response = self.transport.send(request).await?;
        self.read_response(&method, &path, response)
    }

    fn read_response(&self, method: &Method, path: &str, response: RawResponse) -> Result<Value, ApiError> {
        if response.status == 401 {
            warn!(method = %method, path, "unauthorized; clearing session");
            self.session.clear()?;
            return Err(ApiError::Unauthorized);
        }

        if !response.is_success() {
            let message = envelope::extract_message(&response.body, &response.status_text, "Request failed");
            debug!(method = %method, path, status = response.status, %message, "api request failed");
            return Err(ApiError::Response { status: response.status, message });
        }

        let Some(value) = envelope::parse_body(&response.body) else {
            return Err(ApiError::Parse(format!("{method} {path}: body is not JSON")));
        };

        if envelope::reports_failure(&value) {
            let message = envelope::extract_message(&response.body, "", "Request failed");
            return Err(ApiError::Response { status: response.status, message });
        }

        Ok(value)
    }

    // =========================================================================
    // Typed helpers
    // =========================================================================

    /// GET a list. Malformed envelopes degrade to an empty list, duplicate id
    /// keys collapse per [`WireRow::KEY_GROUPS`], and rows that still do not
    /// fit `T` are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error for auth, transport, or failure-status responses.
    pub async fn get_list<T: WireRow>(&self, path: &str, query: &[(&str, &str)]) -> Result<Vec<T>, ApiError> {
        let mut request = ApiRequest::new(Method::GET, path);
        for (key, value) in query {
            request = request.query(key, value);
        }
        let value = self.send(request).await?;

        let Some(rows) = envelope::list_items(value) else {
            warn!(path, "list response had no recognizable rows; treating as empty");
            return Ok(Vec::new());
        };

        let total = rows.len();
        let items: Vec<T> = rows
            .into_iter()
            .filter_map(|row| match wire::from_row::<T>(row) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(path, error = %e, "skipping unreadable row");
                    None
                }
            })
            .collect();
        debug!(path, total, kept = items.len(), "list loaded");
        Ok(items)
    }

    /// GET a single record, unwrapping `{ data }`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] when the body does not fit `T`.
    pub async fn get_one<T: WireRow>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError> {
        let mut request = ApiRequest::new(Method::GET, path);
        for (key, value) in query {
            request = request.query(key, value);
        }
        let value = envelope::unwrap_data(self.send(request).await?);
        wire::from_row(value).map_err(|e| ApiError::Parse(format!("GET {path}: {e}")))
    }

    /// POST JSON; returns the unwrapped `data` (or the whole body).
    ///
    /// # Errors
    ///
    /// Returns an error for auth, transport, or failure responses.
    pub async fn post(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.send_json(Method::POST, path, body).await
    }

    /// # Errors
    ///
    /// Returns an error for auth, transport, or failure responses.
    pub async fn put(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.send_json(Method::PUT, path, body).await
    }

    /// # Errors
    ///
    /// Returns an error for auth, transport, or failure responses.
    pub async fn patch(&self, path: &str, body: Value) -> Result<Value, ApiError> {
        self.send_json(Method::PATCH, path, body).await
    }

    /// # Errors
    ///
    /// Returns an error for auth, transport, or failure responses.
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let value = self.send(ApiRequest::new(Method::DELETE, path)).await?;
        Ok(envelope::unwrap_data(value))
    }

    /// Upload one file as multipart and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Parse`] when the response names no URL.
    pub async fn upload(&self, file_name: &str, mime: &str, bytes: Vec<u8>) -> Result<String, ApiError> {
        let part = FilePart {
            field: UPLOAD_FIELD.to_owned(),
            file_name: file_name.to_owned(),
            mime: mime.to_owned(),
            bytes,
        };
        let value = self.send(ApiRequest::new(Method::POST, UPLOAD_PATH).multipart(part)).await?;
        envelope::upload_url(&value).ok_or_else(|| ApiError::Parse(format!("upload of {file_name} returned no URL")))
    }

    async fn send_json(&self, method: Method, path: &str, body: Value) -> Result<Value, ApiError> {
        let value = self.send(ApiRequest::new(method, path).json(body)).await?;
        Ok(envelope::unwrap_data(value))
    }
}
