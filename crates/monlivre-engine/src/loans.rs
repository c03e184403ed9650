//! Borrowed-book view model.
//!
//! The dashboard owns an ordered `Vec<BorrowedBook>`. Operations here never
//! reorder it: `load` keeps the backend's order, `renew` edits one record in
//! place, `remove_returned` drops one record.

use chrono::{NaiveDate, TimeDelta};
use monlivre_types::{BorrowedBook, DueStatus, LoanId, contains_ignore_case};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::normalize::{array_items, normalize_loan};

/// Default loan extension granted by one renewal
pub const DEFAULT_RENEWAL_DAYS: i64 = 30;

/// Days-remaining threshold at or below which a loan shows as "due soon"
pub const DEFAULT_DUE_SOON_DAYS: i64 = 3;

/// Normalize a `GET /borrowed-books/{userId}` payload.
///
/// A payload that is not an array loads as an empty set.
pub fn load(payload: &Value) -> Vec<BorrowedBook> {
    load_records(array_items(payload))
}

/// Normalize raw loan objects, preserving their order
pub fn load_records(raw: &[Value]) -> Vec<BorrowedBook> {
    raw.iter().map(normalize_loan).collect()
}

/// Whole days from `today` until `due_date`; negative once the date has passed
pub fn days_remaining(due_date: NaiveDate, today: NaiveDate) -> i64 {
    // Both sides are whole calendar days, so the ceiling is the difference itself
    (due_date - today).num_days()
}

/// Display bucket for a loan's due date.
///
/// The overdue bucket follows the record's `is_overdue` flag, not the date
/// arithmetic; see [`OverduePolicy`] for recomputing the flag.
pub fn due_status(book: &BorrowedBook, today: NaiveDate, due_soon_days: i64) -> DueStatus {
    let Some(due) = book.due_date else {
        return if book.is_overdue {
            DueStatus::Overdue { days_late: 0 }
        } else {
            DueStatus::Unknown
        };
    };

    let days = days_remaining(due, today);
    if book.is_overdue {
        DueStatus::Overdue {
            days_late: (-days).max(0),
        }
    } else if days <= due_soon_days {
        DueStatus::DueSoon { days }
    } else {
        DueStatus::OnTime { days }
    }
}

// --------------------------------------------------------
// Filtering
// --------------------------------------------------------

/// Records whose title, author or genre contain `query`, ignoring case.
///
/// The returned view borrows `records` and can be iterated any number of times.
pub fn filter<'a>(records: &'a [BorrowedBook], query: &str) -> LoanMatches<'a> {
    LoanMatches {
        records,
        query: query.to_lowercase(),
    }
}

/// Lazy, restartable search result over a loan set
#[derive(Debug, Clone)]
pub struct LoanMatches<'a> {
    records: &'a [BorrowedBook],
    query: String,
}

impl<'a> LoanMatches<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a BorrowedBook> + '_ {
        self.records.iter().filter(|book| self.matches(book))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    fn matches(&self, book: &BorrowedBook) -> bool {
        contains_ignore_case(&book.title, &self.query)
            || contains_ignore_case(&book.author, &self.query)
            || contains_ignore_case(&book.genre, &self.query)
    }
}

// --------------------------------------------------------
// Renewal
// --------------------------------------------------------

/// Result of a renewal attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "due_date", rename_all = "snake_case")]
pub enum RenewOutcome {
    NotFound,
    RenewalBlockedOverdue,
    RenewalLimitReached,
    Renewed(NaiveDate),
}

impl RenewOutcome {
    pub fn is_renewed(&self) -> bool {
        matches!(self, RenewOutcome::Renewed(_))
    }
}

/// Loan extension rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalPolicy {
    pub renewal_days: i64,
}

impl Default for RenewalPolicy {
    fn default() -> Self {
        Self {
            renewal_days: DEFAULT_RENEWAL_DAYS,
        }
    }
}

impl RenewalPolicy {
    pub fn new(renewal_days: i64) -> Self {
        Self { renewal_days }
    }

    /// Due date granted by a renewal made on `today`.
    ///
    /// `None` when the extension falls outside the supported date range.
    pub fn next_due_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        today.checked_add_signed(TimeDelta::try_days(self.renewal_days)?)
    }

    /// Check the renewal preconditions without touching anything.
    ///
    /// Returns the blocking outcome, or `None` when the renewal may proceed.
    pub fn check(&self, records: &[BorrowedBook], id: LoanId) -> Option<RenewOutcome> {
        let Some(book) = records.iter().find(|b| b.id == id) else {
            return Some(RenewOutcome::NotFound);
        };
        if book.is_overdue {
            return Some(RenewOutcome::RenewalBlockedOverdue);
        }
        if book.renewal_count >= book.max_renewals {
            return Some(RenewOutcome::RenewalLimitReached);
        }
        None
    }

    /// Renew loan `id` on `today`.
    ///
    /// On any failed precondition the returned set equals the input. An
    /// extension that overflows the calendar is a validation error.
    pub fn renew(
        &self,
        records: &[BorrowedBook],
        id: LoanId,
        today: NaiveDate,
    ) -> Result<(Vec<BorrowedBook>, RenewOutcome)> {
        if let Some(blocked) = self.check(records, id) {
            return Ok((records.to_vec(), blocked));
        }

        let new_due = self.extended_due_date(today)?;
        let updated = records
            .iter()
            .map(|book| {
                if book.id == id {
                    extend(book, new_due)
                } else {
                    book.clone()
                }
            })
            .collect();

        Ok((updated, RenewOutcome::Renewed(new_due)))
    }

    /// [`next_due_date`](Self::next_due_date), with overflow reported as an error
    pub fn extended_due_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        self.next_due_date(today).ok_or_else(|| {
            Error::Validation(format!(
                "a {}-day renewal from {} is out of range",
                self.renewal_days, today
            ))
        })
    }
}

/// Renew loan `id` on `today` with the default 30-day extension
pub fn renew(
    records: &[BorrowedBook],
    id: LoanId,
    today: NaiveDate,
) -> Result<(Vec<BorrowedBook>, RenewOutcome)> {
    RenewalPolicy::default().renew(records, id, today)
}

/// Record a renewal the backend has already granted.
///
/// Unlike [`renew`] this does not re-check the preconditions: the backend is
/// authoritative for confirmed renewals.
pub fn apply_renewal(
    records: &[BorrowedBook],
    id: LoanId,
    new_due: NaiveDate,
) -> Result<Vec<BorrowedBook>> {
    if !records.iter().any(|b| b.id == id) {
        return Err(Error::NotFound(id));
    }

    Ok(records
        .iter()
        .map(|book| {
            if book.id == id {
                extend(book, new_due)
            } else {
                book.clone()
            }
        })
        .collect())
}

fn extend(book: &BorrowedBook, new_due: NaiveDate) -> BorrowedBook {
    BorrowedBook {
        due_date: Some(new_due),
        renewal_count: book.renewal_count + 1,
        ..book.clone()
    }
}

// --------------------------------------------------------
// Return
// --------------------------------------------------------

/// Drop loan `id` after the backend confirmed the return
pub fn remove_returned(records: &[BorrowedBook], id: LoanId) -> Result<Vec<BorrowedBook>> {
    let Some(pos) = records.iter().position(|b| b.id == id) else {
        return Err(Error::NotFound(id));
    };

    let mut remaining = records.to_vec();
    remaining.remove(pos);
    Ok(remaining)
}

// --------------------------------------------------------
// Overdue policy
// --------------------------------------------------------

/// Where the overdue flag comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverduePolicy {
    /// Keep the flag the backend reported at fetch time
    #[default]
    Backend,
    /// Recompute the flag from the due date and today's date
    Derived,
}

impl OverduePolicy {
    /// Apply the policy to a freshly loaded or mutated set.
    ///
    /// Records without a due date keep their reported flag.
    pub fn apply(&self, records: &mut [BorrowedBook], today: NaiveDate) {
        if *self == OverduePolicy::Backend {
            return;
        }
        for book in records.iter_mut() {
            if let Some(due) = book.due_date {
                book.is_overdue = days_remaining(due, today) < 0;
            }
        }
    }
}
