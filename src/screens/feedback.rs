//! Feedback and complaints, with their response threads.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use serde_json::json;
use tracing::info;

use super::{Flow, RemoteCollection, Toasts, check, settle};
use crate::model::feedback::{Feedback, FeedbackFilter, FeedbackForm, FeedbackResponse, FeedbackStats, FeedbackStatus};
use crate::net::ApiClient;

const FEEDBACKS_PATH: &str = "/fc/feedbacks";
const RESPONSES_PATH: &str = "/fc/responses";

pub struct FeedbackScreen {
    api: ApiClient,
    pub items: RemoteCollection<Feedback>,
    /// Thread of the feedback opened with [`FeedbackScreen::load_responses`].
    pub responses: RemoteCollection<FeedbackResponse>,
    open_id: Option<String>,
    pub toasts: Toasts,
}

impl FeedbackScreen {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            items: RemoteCollection::new(),
            responses: RemoteCollection::new(),
            open_id: None,
            toasts: Toasts::default(),
        }
    }

    pub async fn load(&mut self) -> Flow<bool> {
        self.items.load(&self.api, &mut self.toasts, FEEDBACKS_PATH, &[], "Failed to load feedback").await
    }

    #[must_use]
    pub fn filtered(&self, filter: &FeedbackFilter) -> Vec<&Feedback> {
        self.items.filtered(|item| filter.accepts(item))
    }

    #[must_use]
    pub fn stats(&self) -> FeedbackStats {
        FeedbackStats::from_items(self.items.items())
    }

    pub async fn create(&mut self, form: &FeedbackForm) -> Flow<bool> {
        if !check(&mut self.toasts, form) {
            return Ok(false);
        }
        let result = self.api.post(FEEDBACKS_PATH, serde_json::to_value(form).unwrap_or_default()).await;
        if settle(&mut self.toasts, result, "Failed to submit feedback")?.is_none() {
            return Ok(false);
        }
        info!(kind = form.kind.as_str(), priority = form.priority.as_str(), "feedback created");
        self.toasts.success("Feedback submitted");
        self.load().await?;
        Ok(true)
    }

    pub async fn update(&mut self, id: &str, form: &FeedbackForm) -> Flow<bool> {
        if !check(&mut self.toasts, form) {
            return Ok(false);
        }
        let path = format!("{FEEDBACKS_PATH}/{id}");
        let result = self.api.put(&path, serde_json::to_value(form).unwrap_or_default()).await;
        if settle(&mut self.toasts, result, "Failed to update feedback")?.is_none() {
            return Ok(false);
        }
        self.items.update_where(
            |f| f.id == id,
            |f| {
                f.kind = form.kind.clone();
                f.title = form.title.trim().to_owned();
                f.description = form.description.trim().to_owned();
                f.priority = form.priority.clone();
                f.status = form.status.clone();
                f.assigned_to.clone_from(&form.assigned_to);
                f.related_vendor.clone_from(&form.related_vendor);
            },
        );
        self.toasts.success("Feedback updated");
        Ok(true)
    }

    /// Status-only PUT from the row menu.
    pub async fn set_status(&mut self, id: &str, status: FeedbackStatus) -> Flow<bool> {
        let path = format!("{FEEDBACKS_PATH}/{id}");
        let result = self.api.put(&path, json!({ "status": status.as_str() })).await;
        if settle(&mut self.toasts, result, "Failed to update status")?.is_none() {
            return Ok(false);
        }
        self.items.update_where(|f| f.id == id, |f| f.status = status);
        self.toasts.success("Status updated");
        Ok(true)
    }

    pub async fn delete(&mut self, id: &str) -> Flow<bool> {
        let result = self.api.delete(&format!("{FEEDBACKS_PATH}/{id}")).await;
        if settle(&mut self.toasts, result, "Failed to delete feedback")?.is_none() {
            return Ok(false);
        }
        self.items.remove_where(|f| f.id == id);
        if self.open_id.as_deref() == Some(id) {
            self.open_id = None;
            self.responses.set_items(Vec::new());
        }
        self.toasts.success("Feedback deleted");
        Ok(true)
    }

    // =========================================================================
    // Responses
    // =========================================================================

    pub async fn load_responses(&mut self, feedback_id: &str) -> Flow<bool> {
        if self.open_id.as_deref() != Some(feedback_id) {
            self.responses.set_items(Vec::new());
            self.open_id = Some(feedback_id.to_owned());
        }
        let path = format!("{FEEDBACKS_PATH}/{feedback_id}/responses");
        let loaded = self.responses.load(&self.api, &mut self.toasts, &path, &[], "Failed to load responses").await?;
        if loaded {
            let thread = self.responses.items().to_vec();
            self.items.update_where(|f| f.id == feedback_id, |f| f.responses = thread);
        }
        Ok(loaded)
    }

    pub async fn add_response(&mut self, feedback_id: &str, message: &str) -> Flow<bool> {
        let message = message.trim();
        if message.is_empty() {
            self.toasts.error("message: response cannot be empty");
            return Ok(false);
        }
        let path = format!("{FEEDBACKS_PATH}/{feedback_id}/responses");
        let result = self.api.post(&path, json!({ "message": message })).await;
        if settle(&mut self.toasts, result, "Failed to add response")?.is_none() {
            return Ok(false);
        }
        self.toasts.success("Response added");
        self.load_responses(feedback_id).await?;
        Ok(true)
    }

    pub async fn edit_response(&mut self, response_id: &str, message: &str) -> Flow<bool> {
        let message = message.trim();
        if message.is_empty() {
            self.toasts.error("message: response cannot be empty");
            return Ok(false);
        }
        let result = self.api.put(&format!("{RESPONSES_PATH}/{response_id}"), json!({ "message": message })).await;
        if settle(&mut self.toasts, result, "Failed to update response")?.is_none() {
            return Ok(false);
        }
        self.responses.update_where(|r| r.id == response_id, |r| r.message = message.to_owned());
        self.toasts.success("Response updated");
        Ok(true)
    }

    pub async fn delete_response(&mut self, response_id: &str) -> Flow<bool> {
        let result = self.api.delete(&format!("{RESPONSES_PATH}/{response_id}")).await;
        if settle(&mut self.toasts, result, "Failed to delete response")?.is_none() {
            return Ok(false);
        }
        self.responses.remove_where(|r| r.id == response_id);
        self.toasts.success("Response deleted");
        Ok(true)
    }
}
