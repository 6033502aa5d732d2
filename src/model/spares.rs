//! Ship-spares deliveries (`/spares`).
//!
//! The backend's field names are misspelled (`iteamName`, `arraival`) and
//! inconsistently cased (`Weight`). These three functions are the only place
//! that knows; everything above them sees [`SparesItem`].

#[cfg(test)]
#[path = "spares_test.rs"]
mod spares_test;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::wire;

/// One row of the ship-spares editor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SparesItem {
    /// Server id; rows without one are created on save.
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "item name is required"))]
    pub item_name: String,
    #[serde(default)]
    pub awb_number: String,
    #[serde(default)]
    pub pcs: u32,
    #[validate(range(min = 0.0, message = "weight cannot be negative"))]
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub airline_flight: String,
    #[serde(default)]
    pub remarks: String,
}

/// A spares row in the backend's own field names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SparesApiItem {
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none", alias = "_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none", alias = "jobId")]
    pub job_id: Option<String>,
    #[serde(rename = "iteamName", alias = "itemName", alias = "item_name", default, deserialize_with = "wire::text")]
    pub iteam_name: String,
    #[serde(rename = "awbNumber", alias = "awb_number", alias = "awb", default, deserialize_with = "wire::text")]
    pub awb_number: String,
    #[serde(alias = "pcs", default, deserialize_with = "wire::count")]
    pub qty: u32,
    #[serde(rename = "Weight", alias = "weight", default, deserialize_with = "wire::amount")]
    pub weight: f64,
    #[serde(alias = "arrival", alias = "airlineFlight", alias = "airline_flight", default, deserialize_with = "wire::text")]
    pub arraival: String,
    #[serde(default, deserialize_with = "wire::text", alias = "remark")]
    pub remarks: String,
}

impl wire::WireRow for SparesApiItem {
    const KEY_GROUPS: wire::KeyGroups = &[
        ("id", &["_id"]),
        ("job_id", &["jobId"]),
        ("iteamName", &["itemName", "item_name"]),
        ("awbNumber", &["awb_number", "awb"]),
        ("qty", &["pcs"]),
        ("Weight", &["weight"]),
        ("arraival", &["arrival", "airlineFlight", "airline_flight"]),
        ("remarks", &["remark"]),
    ];
}

impl SparesApiItem {
    fn from_form(item: &SparesItem, id: Option<String>, job_id: Option<&str>) -> Self {
        Self {
            id,
            job_id: job_id.map(ToOwned::to_owned),
            iteam_name: item.item_name.trim().to_owned(),
            awb_number: item.awb_number.trim().to_owned(),
            qty: item.pcs,
            weight: item.weight,
            arraival: item.airline_flight.trim().to_owned(),
            remarks: item.remarks.trim().to_owned(),
        }
    }
}

/// POST body: the rows without ids, in API field names.
#[must_use]
pub fn to_api_create_body(items: &[SparesItem], job_id: Option<&str>) -> Vec<SparesApiItem> {
    items.iter().map(|item| SparesApiItem::from_form(item, None, job_id)).collect()
}

/// PUT body: rows that carry an id. Rows without one are skipped.
#[must_use]
pub fn to_api_update_body(items: &[SparesItem], job_id: Option<&str>) -> Vec<SparesApiItem> {
    items
        .iter()
        .filter_map(|item| item.id.clone().map(|id| SparesApiItem::from_form(item, Some(id), job_id)))
        .collect()
}

/// Editor rows from API rows.
#[must_use]
pub fn from_api_to_form(items: Vec<SparesApiItem>) -> Vec<SparesItem> {
    items
        .into_iter()
        .map(|item| SparesItem {
            id: item.id,
            item_name: item.iteam_name,
            awb_number: item.awb_number,
            pcs: item.qty,
            weight: item.weight,
            airline_flight: item.arraival,
            remarks: item.remarks,
        })
        .collect()
}

/// Split editor rows into (create, update) by whether they have a server id.
#[must_use]
pub fn partition_for_save(items: &[SparesItem]) -> (Vec<SparesItem>, Vec<SparesItem>) {
    items.iter().cloned().partition(|item| item.id.is_none())
}
