//! Ship-spares editor for one port call.
//!
//! Saving splits the rows: rows without a server id go out in one POST,
//! rows with an id in one PUT, creates first. An empty half sends nothing.
//! The list is re-fetched afterwards so new rows pick up their ids.

#[cfg(test)]
#[path = "spares_test.rs"]
mod spares_test;

use tracing::info;

use super::{Flow, RemoteCollection, Toasts, check, settle};
use crate::model::spares::{
    SparesApiItem, SparesItem, from_api_to_form, partition_for_save, to_api_create_body, to_api_update_body,
};
use crate::net::ApiClient;

const SPARES_PATH: &str = "/spares";

pub struct ShipSparesEditor {
    api: ApiClient,
    job_id: String,
    pub items: RemoteCollection<SparesItem>,
    pub toasts: Toasts,
}

impl ShipSparesEditor {
    #[must_use]
    pub fn new(api: ApiClient, job_id: impl Into<String>) -> Self {
        Self { api, job_id: job_id.into(), items: RemoteCollection::new(), toasts: Toasts::default() }
    }

    pub async fn load(&mut self) -> Flow<bool> {
        let result = self.api.get_list::<SparesApiItem>(SPARES_PATH, &[("job_id", self.job_id.as_str())]).await;
        match settle(&mut self.toasts, result, "Failed to load ship spares")? {
            Some(rows) => {
                self.items.set_items(from_api_to_form(rows));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Persist the editor rows. Returns false if validation or either
    /// request failed; a failed create skips the update.
    pub async fn save(&mut self, rows: &[SparesItem]) -> Flow<bool> {
        if !rows.iter().all(|row| check(&mut self.toasts, row)) {
            return Ok(false);
        }
        let (create, update) = partition_for_save(rows);
        if create.is_empty() && update.is_empty() {
            self.toasts.info("Nothing to save");
            return Ok(true);
        }

        if !create.is_empty() {
            let body = serde_json::to_value(to_api_create_body(&create, Some(&self.job_id))).unwrap_or_default();
            let result = self.api.post(SPARES_PATH, body).await;
            if settle(&mut self.toasts, result, "Failed to add ship spares")?.is_none() {
                return Ok(false);
            }
        }
        if !update.is_empty() {
            let body = serde_json::to_value(to_api_update_body(&update, Some(&self.job_id))).unwrap_or_default();
            let result = self.api.put(SPARES_PATH, body).await;
            if settle(&mut self.toasts, result, "Failed to update ship spares")?.is_none() {
                return Ok(false);
            }
        }

        info!(job_id = %self.job_id, created = create.len(), updated = update.len(), "ship spares saved");
        self.toasts.success("Ship spares saved");
        self.load().await?;
        Ok(true)
    }

    pub async fn delete(&mut self, id: &str) -> Flow<bool> {
        let result = self.api.delete(&format!("{SPARES_PATH}/{id}")).await;
        if settle(&mut self.toasts, result, "Failed to delete ship spare")?.is_none() {
            return Ok(false);
        }
        self.items.remove_where(|item| item.id.as_deref() == Some(id));
        self.toasts.success("Ship spare deleted");
        Ok(true)
    }
}
