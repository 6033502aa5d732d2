//! Port-call administration client.
//!
//! Typed access to the port-call backend: wire models with their mappings,
//! an API client over a pluggable transport, a persisted session, and one
//! state model per admin screen.

pub mod config;
pub mod error;
pub mod model;
pub mod net;
pub mod screens;
pub mod storage;

pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, StoreError, ValidationError};
pub use net::ApiClient;
pub use screens::{Flow, Redirect};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Session};
