//! Vendors (`/vendor`) and the vendor-creation payload.

#[cfg(test)]
#[path = "vendor_test.rs"]
mod vendor_test;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::wire;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorDocument {
    #[serde(default, deserialize_with = "wire::text", alias = "document_name", alias = "fileName")]
    pub name: String,
    #[serde(default, deserialize_with = "wire::text", alias = "file_url", alias = "fileUrl")]
    pub url: String,
}

impl wire::WireRow for VendorDocument {
    const KEY_GROUPS: wire::KeyGroups = &[("name", &["document_name", "fileName"]), ("url", &["file_url", "fileUrl"])];
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    #[serde(deserialize_with = "wire::id", alias = "id", alias = "_id")]
    pub vendor_id: String,
    #[serde(default, deserialize_with = "wire::text", alias = "vendor_name")]
    pub name: String,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text", alias = "companyType")]
    pub company_type: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub remark: Option<String>,
    #[serde(default, deserialize_with = "wire::string_list")]
    pub services: Vec<String>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub status: Option<String>,
    /// Primary contact as the list endpoint reports it; free-form on the wire.
    #[serde(default)]
    pub pic: serde_json::Value,
    #[serde(default, deserialize_with = "wire::rows")]
    pub documents: Vec<VendorDocument>,
}

impl wire::WireRow for Vendor {
    const KEY_GROUPS: wire::KeyGroups = &[
        ("vendor_id", &["id", "_id"]),
        ("name", &["vendor_name"]),
        ("company_type", &["companyType"]),
    ];
}

impl Vendor {
    /// True when the vendor offers `service` (matched by id or name). A vendor
    /// with no declared services is offered for everything.
    #[must_use]
    pub fn offers(&self, service_id: &str, service_name: &str) -> bool {
        self.services.is_empty()
            || self
                .services
                .iter()
                .any(|s| s == service_id || s.eq_ignore_ascii_case(service_name))
    }

    #[must_use]
    pub fn matches(&self, needle_lower: &str) -> bool {
        wire::contains_folded(&self.name, needle_lower)
            || self.email.as_deref().is_some_and(|e| wire::contains_folded(e, needle_lower))
            || self.phone.as_deref().is_some_and(|p| wire::contains_folded(p, needle_lower))
            || self.services.iter().any(|s| wire::contains_folded(s, needle_lower))
    }

    #[must_use]
    pub fn status_is(&self, status: &str) -> bool {
        self.status.as_deref().unwrap_or("active").eq_ignore_ascii_case(status)
    }
}

/// Company section of the vendor wizard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct VendorCompanyInfo {
    #[validate(length(min = 1, message = "company name is required"))]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company_type: String,
    #[validate(custom(function = "super::email_if_present", message = "must be a valid email"))]
    #[serde(default, deserialize_with = "wire::opt_text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub services: Vec<String>,
}

/// One contact row of the vendor wizard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct VendorPicDraft {
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[validate(custom(function = "super::email_if_present", message = "must be a valid email"))]
    #[serde(default, deserialize_with = "wire::opt_text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub remark: String,
}

/// Composite body posted once every document has a public URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewVendorPayload {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub company_type: String,
    pub email: String,
    pub remark: String,
    pub services: Vec<String>,
    pub status: String,
    pub documents: Vec<VendorDocument>,
    pub pics: Vec<VendorPicDraft>,
}

impl NewVendorPayload {
    #[must_use]
    pub fn new(info: &VendorCompanyInfo, documents: Vec<VendorDocument>, pics: &[VendorPicDraft]) -> Self {
        Self {
            name: info.name.trim().to_owned(),
            address: info.address.trim().to_owned(),
            phone: info.phone.trim().to_owned(),
            company_type: info.company_type.trim().to_owned(),
            email: info.email.as_deref().unwrap_or_default().trim().to_owned(),
            remark: info.remark.trim().to_owned(),
            services: info.services.clone(),
            status: "active".to_owned(),
            documents,
            pics: pics.to_vec(),
        }
    }
}
