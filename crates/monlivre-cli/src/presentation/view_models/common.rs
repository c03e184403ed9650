use monlivre_engine::{Notification, Severity};
use serde::Serialize;

/// Output density, picked by `--quiet`, `--compact` or `--verbose`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Minimal,
    Compact,
    #[default]
    Standard,
    Verbose,
}

/// Headline of a command result.
///
/// Shares its severity scale with the dashboard notifications, so the outcome
/// of an action can be promoted to the badge as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub level: Severity,
    pub label: String,
}

impl StatusBadge {
    pub fn new(level: Severity, label: impl Into<String>) -> Self {
        Self {
            level,
            label: label.into(),
        }
    }

    pub fn success(label: impl Into<String>) -> Self {
        Self::new(Severity::Success, label)
    }

    pub fn info(label: impl Into<String>) -> Self {
        Self::new(Severity::Info, label)
    }

    pub fn warning(label: impl Into<String>) -> Self {
        Self::new(Severity::Warning, label)
    }

    pub fn error(label: impl Into<String>) -> Self {
        Self::new(Severity::Error, label)
    }

    pub fn icon(&self) -> &str {
        self.level.icon()
    }

    /// True when `note` would print the same line as this badge
    pub fn echoes(&self, note: &Notification) -> bool {
        self.level == note.severity && self.label == note.message
    }
}

impl From<&Notification> for StatusBadge {
    fn from(note: &Notification) -> Self {
        Self::new(note.severity, note.message.clone())
    }
}

/// Follow-up command suggested under a result
#[derive(Debug, Clone, Serialize)]
pub struct Guidance {
    pub description: String,
    pub command: Option<String>,
}

impl Guidance {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            command: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_from_notification_keeps_severity() {
        let note = Notification::new(Severity::Warning, "Renouvellement refusé");
        let badge = StatusBadge::from(&note);

        assert_eq!(badge, StatusBadge::warning("Renouvellement refusé"));
        assert_eq!(badge.icon(), "⚠️");
        assert!(badge.echoes(&note));
        assert!(!StatusBadge::error("Renouvellement refusé").echoes(&note));
    }

    #[test]
    fn test_badge_serializes_severity_lowercase() {
        let json = serde_json::to_value(StatusBadge::success("Livre retourné")).unwrap();
        assert_eq!(json["level"], "success");
        assert_eq!(json["label"], "Livre retourné");
    }
}
