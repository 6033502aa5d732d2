//! User administration.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use serde_json::json;
use tracing::info;

use super::{Flow, RemoteCollection, Toasts, check, needle, settle};
use crate::model::user::{User, UserForm};
use crate::model::wire;
use crate::net::ApiClient;

pub struct UsersScreen {
    api: ApiClient,
    pub users: RemoteCollection<User>,
    pub toasts: Toasts,
}

impl UsersScreen {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api, users: RemoteCollection::new(), toasts: Toasts::default() }
    }

    pub async fn load(&mut self) -> Flow<bool> {
        self.users.load(&self.api, &mut self.toasts, "/user", &[], "Failed to load users").await
    }

    /// Search over name, email, and role.
    #[must_use]
    pub fn filtered(&self, search: &str) -> Vec<&User> {
        let needle = needle(search);
        self.users.filtered(|u| {
            needle.is_empty()
                || wire::contains_folded(&u.name, &needle)
                || wire::contains_folded(&u.email, &needle)
                || u.role.as_deref().is_some_and(|r| wire::contains_folded(r, &needle))
        })
    }

    pub async fn create(&mut self, form: &UserForm) -> Flow<bool> {
        if !check(&mut self.toasts, form) {
            return Ok(false);
        }
        let result = self.api.post("/user", form.to_api()).await;
        if settle(&mut self.toasts, result, "Failed to create user")?.is_none() {
            return Ok(false);
        }
        info!(email = %form.email.trim(), "user created");
        self.toasts.success("User created");
        self.load().await?;
        Ok(true)
    }

    /// Flip a user between active and inactive. The server's answer wins
    /// when it reports the new state; otherwise the local flag is inverted.
    pub async fn toggle_status(&mut self, id: &str) -> Flow<bool> {
        let result = self.api.patch(&format!("/user/{id}/toggle-status"), json!({})).await;
        let Some(answer) = settle(&mut self.toasts, result, "Failed to update user status")? else {
            return Ok(false);
        };
        let reported = answer.get("is_active").or_else(|| answer.get("status")).map(wire::flag_from_value);
        self.users.update_where(|u| u.id == id, |u| u.is_active = reported.unwrap_or(!u.is_active));
        self.toasts.success("User status updated");
        Ok(true)
    }
}
