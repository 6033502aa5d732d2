//! HTTP transport seam.
//!
//! `ApiClient` speaks to the backend through [`Transport`] so screen logic can
//! be exercised against a recording fake. [`ReqwestTransport`] is the real
//! implementation: a thin wrapper that turns an [`ApiRequest`] into one
//! `reqwest` call and hands back the raw status and body.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// A file attached to a multipart upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(FilePart),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, always starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub bearer: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: RequestBody::Empty, bearer: None }
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_owned(), value.to_owned()));
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn multipart(mut self, part: FilePart) -> Self {
        self.body = RequestBody::Multipart(part);
        self
    }

    /// The JSON body, if any. Convenient for assertions.
    #[must_use]
    pub fn json_body(&self) -> Option<&Value> {
        match &self.body {
            RequestBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Status and body as received, before any envelope handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] when no response was received. A
    /// response with a failure status is still `Ok`.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().connect_timeout(Duration::from_secs(config.timeouts.connect_secs));
        if let Some(secs) = config.timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| ApiError::Request(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.http.request(request.method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(part) => {
                let file = reqwest::multipart::Part::bytes(part.bytes)
                    .file_name(part.file_name)
                    .mime_str(&part.mime)
                    .map_err(|e| ApiError::Request(e.to_string()))?;
                builder.multipart(reqwest::multipart::Form::new().part(part.field, file))
            }
        };

        let response = builder.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
            body,
        })
    }
}
