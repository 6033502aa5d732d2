//! Toast notifications queued by screen operations.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Toasts {
    queue: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.queue.push(Toast { level, message: message.into() });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }

    /// Take every pending toast, oldest first.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.queue)
    }

    #[must_use]
    pub fn last(&self) -> Option<&Toast> {
        self.queue.last()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.queue.iter().any(|t| t.level == ToastLevel::Error)
    }
}
