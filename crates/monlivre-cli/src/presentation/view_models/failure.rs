use serde::Serialize;
use std::fmt;

use super::{CreateView, ViewMode};

/// An action that did not complete; the details are in the notifications
#[derive(Debug, Serialize)]
pub struct ActionFailureViewModel {
    pub action: &'static str,
    pub error_kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

impl CreateView for ActionFailureViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(FailureLine(self))
    }
}

struct FailureLine<'a>(&'a ActionFailureViewModel);

impl fmt::Display for FailureLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.status {
            Some(status) => writeln!(f, "{} failed (HTTP {})", self.0.action, status),
            None => writeln!(f, "{} failed", self.0.action),
        }
    }
}
