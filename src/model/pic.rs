//! Persons in charge: vendor contacts (`/vendorpic`) and customer contacts
//! (`/customerpic`), unified into one tagged list.
//!
//! DESIGN
//! ======
//! The two endpoints share most fields but differ in their owner id and the
//! customer-only extras. [`Pic`] keeps the shared fields flat and moves the
//! difference into [`PicOwner`], so the `type` discriminator can never
//! disagree with the fields that are present.

#[cfg(test)]
#[path = "pic_test.rs"]
mod pic_test;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::wire;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PicType {
    #[default]
    Vendor,
    Customer,
}

impl PicType {
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Vendor => "/vendorpic",
            Self::Customer => "/customerpic",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vendor => "vendor",
            Self::Customer => "customer",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "vendor" => Some(Self::Vendor),
            "customer" => Some(Self::Customer),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PicOwner {
    Vendor {
        vendor_id: String,
    },
    Customer {
        customer_id: String,
        birthday: Option<NaiveDate>,
        department: Option<String>,
        receive_updates: bool,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pic {
    pub pic_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub remark: String,
    #[serde(flatten)]
    pub owner: PicOwner,
}

impl Pic {
    #[must_use]
    pub fn pic_type(&self) -> PicType {
        match self.owner {
            PicOwner::Vendor { .. } => PicType::Vendor,
            PicOwner::Customer { .. } => PicType::Customer,
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim()).trim().to_owned()
    }

    /// PIC search over name, email, and phone. `needle_lower` is lowercased.
    #[must_use]
    pub fn matches(&self, needle_lower: &str) -> bool {
        wire::contains_folded(&self.full_name(), needle_lower)
            || wire::contains_folded(&self.email, needle_lower)
            || wire::contains_folded(&self.phone, needle_lower)
    }
}

// =============================================================================
// WIRE SHAPES
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorPicWire {
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none", alias = "id", alias = "_id")]
    pub pic_id: Option<String>,
    #[serde(default, deserialize_with = "wire::text")]
    pub vendor_id: String,
    #[serde(default, deserialize_with = "wire::text", alias = "firstName")]
    pub first_name: String,
    #[serde(default, deserialize_with = "wire::text", alias = "lastName")]
    pub last_name: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub phone: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub email: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub remark: String,
}

impl wire::WireRow for VendorPicWire {
    const KEY_GROUPS: wire::KeyGroups = &[
        ("pic_id", &["id", "_id"]),
        ("first_name", &["firstName"]),
        ("last_name", &["lastName"]),
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerPicWire {
    #[serde(default, deserialize_with = "wire::opt_id", skip_serializing_if = "Option::is_none", alias = "id", alias = "_id")]
    pub pic_id: Option<String>,
    #[serde(default, deserialize_with = "wire::text")]
    pub customer_id: String,
    #[serde(default, deserialize_with = "wire::text", alias = "firstName")]
    pub first_name: String,
    #[serde(default, deserialize_with = "wire::text", alias = "lastName")]
    pub last_name: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub phone: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub email: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub remark: String,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub birthday: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text")]
    pub department: Option<String>,
    #[serde(rename = "receiveUpdates", default, deserialize_with = "wire::flag", alias = "receive_updates")]
    pub receive_updates: bool,
}

impl wire::WireRow for CustomerPicWire {
    const KEY_GROUPS: wire::KeyGroups = &[
        ("pic_id", &["id", "_id"]),
        ("first_name", &["firstName"]),
        ("last_name", &["lastName"]),
        ("receiveUpdates", &["receive_updates"]),
    ];
}

/// Leading `YYYY-MM-DD` of a date or timestamp string.
fn parse_birthday(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

impl VendorPicWire {
    /// Rows without an id cannot be edited or deleted and are dropped.
    #[must_use]
    pub fn into_pic(self) -> Option<Pic> {
        Some(Pic {
            pic_id: self.pic_id?,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            email: self.email,
            remark: self.remark,
            owner: PicOwner::Vendor { vendor_id: self.vendor_id },
        })
    }
}

impl CustomerPicWire {
    #[must_use]
    pub fn into_pic(self) -> Option<Pic> {
        Some(Pic {
            pic_id: self.pic_id?,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            email: self.email,
            remark: self.remark,
            owner: PicOwner::Customer {
                customer_id: self.customer_id,
                birthday: parse_birthday(self.birthday.as_deref()),
                department: self.department,
                receive_updates: self.receive_updates,
            },
        })
    }
}

// =============================================================================
// FORM
// =============================================================================

/// Create/edit dialog for either PIC type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PicForm {
    #[serde(rename = "type", default)]
    pub kind: PicType,
    /// Vendor id or customer id depending on `kind`.
    #[validate(length(min = 1, message = "owner is required"))]
    pub owner_id: String,
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
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub receive_updates: bool,
}

impl PicForm {
    /// Prefill the edit dialog from an existing row.
    #[must_use]
    pub fn from_pic(pic: &Pic) -> Self {
        let base = Self {
            kind: pic.pic_type(),
            owner_id: String::new(),
            first_name: pic.first_name.clone(),
            last_name: pic.last_name.clone(),
            phone: pic.phone.clone(),
            email: Some(pic.email.clone()).filter(|e| !e.is_empty()),
            remark: pic.remark.clone(),
            birthday: None,
            department: None,
            receive_updates: false,
        };
        match &pic.owner {
            PicOwner::Vendor { vendor_id } => Self { owner_id: vendor_id.clone(), ..base },
            PicOwner::Customer { customer_id, birthday, department, receive_updates } => Self {
                owner_id: customer_id.clone(),
                birthday: *birthday,
                department: department.clone(),
                receive_updates: *receive_updates,
                ..base
            },
        }
    }

    /// Request body for the endpoint matching `kind`.
    #[must_use]
    pub fn to_api(&self, pic_id: Option<&str>) -> serde_json::Value {
        let pic_id = pic_id.map(ToOwned::to_owned);
        let email = self.email.clone().unwrap_or_default().trim().to_owned();
        match self.kind {
            PicType::Vendor => serde_json::to_value(VendorPicWire {
                pic_id,
                vendor_id: self.owner_id.trim().to_owned(),
                first_name: self.first_name.trim().to_owned(),
                last_name: self.last_name.trim().to_owned(),
                phone: self.phone.trim().to_owned(),
                email,
                remark: self.remark.trim().to_owned(),
            }),
            PicType::Customer => serde_json::to_value(CustomerPicWire {
                pic_id,
                customer_id: self.owner_id.trim().to_owned(),
                first_name: self.first_name.trim().to_owned(),
                last_name: self.last_name.trim().to_owned(),
                phone: self.phone.trim().to_owned(),
                email,
                remark: self.remark.trim().to_owned(),
                birthday: self.birthday.map(|d| d.format("%Y-%m-%d").to_string()),
                department: self.department.clone().filter(|d| !d.trim().is_empty()),
                receive_updates: self.receive_updates,
            }),
        }
        .unwrap_or(serde_json::Value::Null)
    }

    /// Local row after a successful save, before the backend echoes it.
    #[must_use]
    pub fn to_pic(&self, pic_id: &str) -> Pic {
        let owner = match self.kind {
            PicType::Vendor => PicOwner::Vendor { vendor_id: self.owner_id.trim().to_owned() },
            PicType::Customer => PicOwner::Customer {
                customer_id: self.owner_id.trim().to_owned(),
                birthday: self.birthday,
                department: self.department.clone(),
                receive_updates: self.receive_updates,
            },
        };
        Pic {
            pic_id: pic_id.to_owned(),
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            email: self.email.clone().unwrap_or_default().trim().to_owned(),
            remark: self.remark.trim().to_owned(),
            owner,
        }
    }
}
