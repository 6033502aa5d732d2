//! Crew-change editor for one port call.

#[cfg(test)]
#[path = "crew_test.rs"]
mod crew_test;

use tracing::info;

use super::{Flow, RemoteCollection, Toasts, check, settle};
use crate::model::crew::{CrewChangeForm, CrewChangeRecord};
use crate::net::ApiClient;

pub struct CrewChangeEditor {
    api: ApiClient,
    job_id: String,
    pub records: RemoteCollection<CrewChangeRecord>,
    pub toasts: Toasts,
}

impl CrewChangeEditor {
    #[must_use]
    pub fn new(api: ApiClient, job_id: impl Into<String>) -> Self {
        Self { api, job_id: job_id.into(), records: RemoteCollection::new(), toasts: Toasts::default() }
    }

    pub async fn load(&mut self) -> Flow<bool> {
        self.records
            .load(&self.api, &mut self.toasts, "/crew", &[("job_id", self.job_id.as_str())], "Failed to load crew changes")
            .await
    }

    /// Editor rows for every stored record.
    #[must_use]
    pub fn forms(&self) -> Vec<CrewChangeForm> {
        self.records.items().iter().cloned().map(CrewChangeForm::from_api).collect()
    }

    /// POST a new record or PUT an existing one, then re-fetch.
    pub async fn save(&mut self, form: &CrewChangeForm) -> Flow<bool> {
        if !check(&mut self.toasts, form) {
            return Ok(false);
        }
        let body = serde_json::to_value(form.to_api_body(&self.job_id)).unwrap_or_default();
        let result = match form.id.as_deref() {
            Some(id) => self.api.put(&format!("/crew/{id}"), body).await,
            None => self.api.post("/crew", body).await,
        };
        if settle(&mut self.toasts, result, "Failed to save crew change")?.is_none() {
            return Ok(false);
        }
        info!(job_id = %self.job_id, update = form.id.is_some(), "crew change saved");
        self.toasts.success("Crew change saved");
        self.load().await?;
        Ok(true)
    }

    pub async fn delete(&mut self, id: &str) -> Flow<bool> {
        let result = self.api.delete(&format!("/crew/{id}")).await;
        if settle(&mut self.toasts, result, "Failed to delete crew change")?.is_none() {
            return Ok(false);
        }
        self.records.remove_where(|r| r.id.as_deref() == Some(id));
        self.toasts.success("Crew change deleted");
        Ok(true)
    }
}
