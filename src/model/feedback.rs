//! Feedback and complaints (`/fc/feedbacks`, `/fc/responses`).

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

use super::wire;

/// Declares a string-backed enum whose unknown values survive as `Other`
/// instead of failing the whole row.
macro_rules! lenient_enum {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            Other(String),
        }

        impl $name {
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(raw) => raw,
                }
            }

            #[must_use]
            pub fn parse(raw: &str) -> Self {
                let folded = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
                match folded.as_str() {
                    $($wire => Self::$variant,)+
                    _ => Self::Other(raw.trim().to_owned()),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Ok(Self::parse(&wire::text(deserializer)?))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

lenient_enum!(FeedbackKind { Feedback => "feedback", Complaint => "complaint" });
lenient_enum!(Priority { Low => "low", Medium => "medium", High => "high", Critical => "critical" });
lenient_enum!(FeedbackStatus { Open => "open", InProgress => "in_progress", Resolved => "resolved" });

impl Default for FeedbackKind {
    fn default() -> Self {
        Self::Feedback
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

impl Default for FeedbackStatus {
    fn default() -> Self {
        Self::Open
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    #[serde(deserialize_with = "wire::id", alias = "_id", alias = "response_id")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::text", alias = "response", alias = "content")]
    pub message: String,
    #[serde(default, deserialize_with = "wire::opt_text", alias = "responded_by")]
    pub responded_by: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text", alias = "created_at")]
    pub created_at: Option<String>,
}

impl wire::WireRow for FeedbackResponse {
    const KEY_GROUPS: wire::KeyGroups = &[
        ("id", &["_id", "response_id"]),
        ("message", &["response", "content"]),
        ("respondedBy", &["responded_by"]),
        ("createdAt", &["created_at"]),
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(deserialize_with = "wire::id", alias = "_id", alias = "feedback_id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: FeedbackKind,
    #[serde(default, deserialize_with = "wire::text")]
    pub title: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: FeedbackStatus,
    #[serde(default, deserialize_with = "wire::opt_text", alias = "created_by")]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text", alias = "assigned_to")]
    pub assigned_to: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text", alias = "related_vendor")]
    pub related_vendor: Option<String>,
    #[serde(default, deserialize_with = "wire::rows")]
    pub responses: Vec<FeedbackResponse>,
    #[serde(default, deserialize_with = "wire::opt_text", alias = "created_at")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_text", alias = "updated_at")]
    pub updated_at: Option<String>,
}

impl wire::WireRow for Feedback {
    const KEY_GROUPS: wire::KeyGroups = &[
        ("id", &["_id", "feedback_id"]),
        ("createdBy", &["created_by"]),
        ("assignedTo", &["assigned_to"]),
        ("relatedVendor", &["related_vendor"]),
        ("createdAt", &["created_at"]),
        ("updatedAt", &["updated_at"]),
    ];
}

/// Create/edit dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackForm {
    #[serde(rename = "type", default)]
    pub kind: FeedbackKind,
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: FeedbackStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_vendor: Option<String>,
}

impl FeedbackForm {
    #[must_use]
    pub fn from_feedback(feedback: &Feedback) -> Self {
        Self {
            kind: feedback.kind.clone(),
            title: feedback.title.clone(),
            description: feedback.description.clone(),
            priority: feedback.priority.clone(),
            status: feedback.status.clone(),
            assigned_to: feedback.assigned_to.clone(),
            related_vendor: feedback.related_vendor.clone(),
        }
    }
}

/// Client-side filters of the feedback table. `None` means "all".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedbackFilter {
    pub search: String,
    pub kind: Option<FeedbackKind>,
    pub status: Option<FeedbackStatus>,
    pub priority: Option<Priority>,
}

impl FeedbackFilter {
    #[must_use]
    pub fn accepts(&self, feedback: &Feedback) -> bool {
        let needle = self.search.trim().to_lowercase();
        (needle.is_empty()
            || wire::contains_folded(&feedback.title, &needle)
            || wire::contains_folded(&feedback.description, &needle)
            || feedback.related_vendor.as_deref().is_some_and(|v| wire::contains_folded(v, &needle)))
            && self.kind.as_ref().is_none_or(|k| *k == feedback.kind)
            && self.status.as_ref().is_none_or(|s| *s == feedback.status)
            && self.priority.as_ref().is_none_or(|p| *p == feedback.priority)
    }
}

/// Counters for the summary cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackStats {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub complaints: usize,
    pub feedback: usize,
}

impl FeedbackStats {
    #[must_use]
    pub fn from_items(items: &[Feedback]) -> Self {
        items.iter().fold(Self { total: items.len(), ..Self::default() }, |mut stats, item| {
            match item.status {
                FeedbackStatus::Open => stats.open += 1,
                FeedbackStatus::InProgress => stats.in_progress += 1,
                FeedbackStatus::Resolved => stats.resolved += 1,
                FeedbackStatus::Other(_) => {}
            }
            match item.kind {
                FeedbackKind::Complaint => stats.complaints += 1,
                FeedbackKind::Feedback => stats.feedback += 1,
                FeedbackKind::Other(_) => {}
            }
            stats
        })
    }
}
