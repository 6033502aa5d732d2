//! Port call header (`/portcall`) and the service catalog (`/service`).

use serde::{Deserialize, Serialize};

use super::wire;

/// A vessel's scheduled visit, keyed by its job id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortCall {
    #[serde(deserialize_with = "wire::id", alias = "jobId")]
    pub job_id: String,
    #[serde(default, deserialize_with = "wire::opt_text", alias = "vesselName")]
    pub vessel_name: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub port: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub eta: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub etd: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id", alias = "customerId")]
    pub customer_id: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub remarks: Option<String>,
}

impl wire::WireRow for PortCall {
    const KEY_GROUPS: wire::KeyGroups = &[
        ("job_id", &["jobId"]),
        ("vessel_name", &["vesselName"]),
        ("customer_id", &["customerId"]),
    ];
}

/// One entry of the service catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    #[serde(deserialize_with = "wire::id", alias = "id", alias = "_id")]
    pub service_id: String,
    #[serde(default, deserialize_with = "wire::text", alias = "name")]
    pub service_name: String,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub description: Option<String>,
}

impl wire::WireRow for Service {
    const KEY_GROUPS: wire::KeyGroups = &[("service_id", &["id", "_id"]), ("service_name", &["name"])];
}
