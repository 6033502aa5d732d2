//! Staff user accounts (`/user`).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use super::wire;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Option<String>,
    pub is_active: bool,
}

/// Accepts `is_active` / `isActive` as a flag or `status: "active" | "inactive"`,
/// and `id`, `user_id` or `_id` for the identifier, in that precedence.
impl<'de> Deserialize<'de> for User {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            id: Option<Value>,
            #[serde(default)]
            user_id: Option<Value>,
            #[serde(default, rename = "_id")]
            mongo_id: Option<Value>,
            #[serde(default, deserialize_with = "wire::text", alias = "username", alias = "fullName")]
            name: String,
            #[serde(default, deserialize_with = "wire::text")]
            email: String,
            #[serde(default, deserialize_with = "wire::opt_text")]
            role: Option<String>,
            #[serde(default)]
            is_active: Option<Value>,
            #[serde(default, rename = "isActive")]
            is_active_camel: Option<Value>,
            #[serde(default)]
            status: Option<Value>,
        }

        let raw = Raw::deserialize(deserializer)?;
        let id = [&raw.id, &raw.user_id, &raw.mongo_id]
            .into_iter()
            .find_map(|key| key.as_ref().and_then(wire::id_from_value))
            .ok_or_else(|| serde::de::Error::custom("user without id"))?;
        let is_active = [raw.is_active, raw.is_active_camel, raw.status]
            .into_iter()
            .flatten()
            .next()
            .is_none_or(|value| wire::flag_from_value(&value));
        Ok(Self { id, name: raw.name, email: raw.email, role: raw.role, is_active })
    }
}

impl wire::WireRow for User {
    const KEY_GROUPS: wire::KeyGroups = &[("name", &["username", "fullName"])];
}

impl User {
    #[must_use]
    pub fn status_label(&self) -> &'static str {
        if self.is_active { "active" } else { "inactive" }
    }
}

/// Create-user dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserForm {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserForm {
    #[must_use]
    pub fn to_api(&self) -> Value {
        serde_json::json!({
            "name": self.name.trim(),
            "email": self.email.trim(),
            "password": self.password,
            "role": self.role.as_deref().unwrap_or("staff"),
        })
    }
}

#[cfg(test)]
#[path = "user_test.rs"]
mod tests;
