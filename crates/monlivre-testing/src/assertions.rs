//! Assertions over the CLI's `--format json` output.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert that a loan listing holds `expected` loans.
pub fn assert_loan_count(json: &Value, expected: usize) -> Result<()> {
    let loans = json["content"]["loans"]
        .as_array()
        .context("Expected 'content.loans' array in JSON")?;

    if loans.len() != expected {
        anyhow::bail!("Expected {} loans, got {}", expected, loans.len());
    }

    Ok(())
}

/// Assert that a catalog listing holds `expected` books.
pub fn assert_book_count(json: &Value, expected: usize) -> Result<()> {
    let books = json["content"]["books"]
        .as_array()
        .context("Expected 'content.books' array in JSON")?;

    if books.len() != expected {
        anyhow::bail!("Expected {} books, got {}", expected, books.len());
    }

    Ok(())
}

/// Assert that the command emitted exactly one notification with `severity`.
pub fn assert_single_notification(json: &Value, severity: &str) -> Result<()> {
    let notifications = json["notifications"]
        .as_array()
        .context("Expected 'notifications' array in JSON")?;

    if notifications.len() != 1 {
        anyhow::bail!(
            "Expected exactly 1 notification, got {}: {:?}",
            notifications.len(),
            notifications
        );
    }

    let actual = notifications[0]["severity"]
        .as_str()
        .context("Notification missing severity")?;
    if actual != severity {
        anyhow::bail!("Expected {} notification, got {}", severity, actual);
    }

    Ok(())
}
