use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::LoanId;

/// Renewal ceiling applied when the backend omits `max_renewals`
pub const DEFAULT_MAX_RENEWALS: u32 = 2;

/// A single book-to-student loan as shown on the student dashboard.
///
/// Built from the backend payload by the engine's normalizer; the backend
/// mixes snake_case and camelCase field names, this struct is the single
/// canonical shape the rest of the client works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowedBook {
    pub id: LoanId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub isbn: String,

    /// Empty when the backend has no cover; renderers substitute a placeholder
    pub cover_url: String,

    /// Set once when the loan is created, never changed client-side
    pub borrow_date: Option<NaiveDate>,

    /// Moves forward on each granted renewal
    pub due_date: Option<NaiveDate>,

    pub renewal_count: u32,
    pub max_renewals: u32,

    /// Snapshot reported by the backend at fetch time
    pub is_overdue: bool,
}

impl BorrowedBook {
    /// Current client-side state of this loan
    pub fn state(&self) -> LoanState {
        if self.is_overdue {
            LoanState::Overdue
        } else if self.renewal_count >= self.max_renewals {
            LoanState::RenewalExhausted
        } else {
            LoanState::Active
        }
    }

    /// Whether the renew action should be offered at all
    pub fn can_renew(&self) -> bool {
        self.state() == LoanState::Active
    }

    pub fn renewals_left(&self) -> u32 {
        self.max_renewals.saturating_sub(self.renewal_count)
    }

    pub fn has_cover(&self) -> bool {
        !self.cover_url.trim().is_empty()
    }
}

/// Client-side lifecycle of a loan.
///
/// `Returned` is terminal and is represented by the record leaving the set;
/// it is listed so callers can report the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanState {
    Active,
    RenewalExhausted,
    Overdue,
    Returned,
}

impl LoanState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanState::Active => "active",
            LoanState::RenewalExhausted => "renewal_exhausted",
            LoanState::Overdue => "overdue",
            LoanState::Returned => "returned",
        }
    }
}

/// Display bucket for the due date column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DueStatus {
    /// Flagged overdue; `days_late` is the absolute value of the days remaining
    Overdue { days_late: i64 },
    /// Due within the configured threshold (includes today and negative
    /// values when the backend has not flagged the loan yet)
    DueSoon { days: i64 },
    OnTime { days: i64 },
    /// The due date is missing or could not be parsed
    Unknown,
}
