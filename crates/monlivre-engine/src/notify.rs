use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn icon(&self) -> &str {
        match self {
            Severity::Success => "✅",
            Severity::Info => "ℹ️",
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// FIFO of user-facing messages.
///
/// Controllers push one entry per user action; the front end drains the queue
/// whenever it is ready to show them. Nothing here waits for the user.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    items: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.items.push_back(notification);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::new(Severity::Success, message));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::new(Severity::Info, message));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::new(Severity::Warning, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::new(Severity::Error, message));
    }

    pub fn peek(&self) -> Option<&Notification> {
        self.items.front()
    }

    /// Remove and return everything queued so far, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        self.items.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
