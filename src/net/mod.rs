//! Backend access: transport seam, envelope handling, and the API client.

pub mod client;
pub mod envelope;
pub mod transport;

pub use client::ApiClient;
pub use transport::{ApiRequest, FilePart, RawResponse, ReqwestTransport, RequestBody, Transport};
