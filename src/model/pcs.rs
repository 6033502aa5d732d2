//! Port-call services (`/pcs`) and their task headers.

#[cfg(test)]
#[path = "pcs_test.rs"]
mod pcs_test;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::wire;

/// Assignment of one service type to one vendor for a port call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortCallService {
    #[serde(deserialize_with = "wire::id", alias = "pcs_id", alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub job_id: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub service_id: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub service_name: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub vendor_id: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub vendor_name: String,
    /// `true` once every task header is completed.
    #[serde(default, deserialize_with = "wire::flag")]
    pub status: bool,
    #[serde(default, deserialize_with = "wire::opt_text", alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text", alias = "updatedAt")]
    pub updated_at: Option<String>,
}

impl wire::WireRow for PortCallService {
    const KEY_GROUPS: wire::KeyGroups = &[
        ("id", &["pcs_id", "_id"]),
        ("created_at", &["createdAt"]),
        ("updated_at", &["updatedAt"]),
    ];
}

impl PortCallService {
    /// Service/vendor search. `needle_lower` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle_lower: &str) -> bool {
        wire::contains_folded(&self.service_name, needle_lower) || wire::contains_folded(&self.vendor_name, needle_lower)
    }
}

/// Body of the "assign service" dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewPortCallService {
    #[validate(length(min = 1, message = "is required"))]
    pub job_id: String,
    #[validate(length(min = 1, message = "select a service"))]
    pub service_id: String,
    #[validate(length(min = 1, message = "select a vendor"))]
    pub vendor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
}

/// A checklist step of a port-call service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskHeader {
    #[serde(deserialize_with = "wire::id", alias = "header_id", alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::text", alias = "name", alias = "headerName")]
    pub header_name: String,
    #[serde(default)]
    pub status: serde_json::Value,
}

impl wire::WireRow for TaskHeader {
    const KEY_GROUPS: wire::KeyGroups = &[("id", &["header_id", "_id"]), ("header_name", &["name", "headerName"])];
}

impl TaskHeader {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        wire::flag_from_value(&self.status)
    }
}

/// True when a service should be flipped to complete: it has headers, every
/// header is done, and it is not already marked.
#[must_use]
pub fn needs_completion(service: &PortCallService, headers: &[TaskHeader]) -> bool {
    !service.status && !headers.is_empty() && headers.iter().all(TaskHeader::is_completed)
}

/// Completion summary shown above the services table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompletionStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub percent: u8,
}

impl CompletionStats {
    #[must_use]
    pub fn from_services(services: &[PortCallService]) -> Self {
        let total = services.len();
        let completed = services.iter().filter(|s| s.status).count();
        let percent = if total == 0 { 0 } else { u8::try_from(completed * 100 / total).unwrap_or(100) };
        Self { total, completed, pending: total - completed, percent }
    }
}
