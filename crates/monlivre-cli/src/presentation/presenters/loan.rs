use chrono::NaiveDate;
use monlivre_engine::{DashboardStats, Notification, RenewOutcome, due_status};
use monlivre_types::{BorrowedBook, LoanId};

use super::badge_for;
use crate::args::hints::cmd;
use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, LoanDetailViewModel, LoanEntryViewModel, LoanListViewModel,
    LoanStatsViewModel, RenewResultViewModel, ReturnResultViewModel, StatusBadge,
};

/// Inputs every loan row needs besides the record itself
#[derive(Debug, Clone, Copy)]
pub struct LoanDisplay<'a> {
    pub today: NaiveDate,
    pub due_soon_days: i64,
    pub placeholder_cover: &'a str,
}

impl LoanDisplay<'_> {
    fn entry(&self, book: &BorrowedBook) -> LoanEntryViewModel {
        let cover_url = if book.has_cover() {
            book.cover_url.clone()
        } else {
            self.placeholder_cover.to_string()
        };
        LoanEntryViewModel {
            id: book.id.get(),
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            isbn: book.isbn.clone(),
            cover_url,
            has_cover: book.has_cover(),
            borrow_date: book.borrow_date,
            due_date: book.due_date,
            renewal_count: book.renewal_count,
            max_renewals: book.max_renewals,
            renewals_left: book.renewals_left(),
            state: book.state(),
            due: due_status(book, self.today, self.due_soon_days),
            can_renew: book.can_renew(),
        }
    }

    fn entries(&self, books: &[BorrowedBook]) -> Vec<LoanEntryViewModel> {
        books.iter().map(|b| self.entry(b)).collect()
    }
}

fn stats_view(stats: DashboardStats) -> LoanStatsViewModel {
    LoanStatsViewModel {
        borrowed: stats.borrowed,
        overdue: stats.overdue,
        renewals: stats.renewals,
        available_slots: stats.available_slots,
    }
}

pub fn present_loan_list(
    display: LoanDisplay<'_>,
    shown: &[BorrowedBook],
    total_count: usize,
    query: Option<String>,
    stats: DashboardStats,
) -> CommandResultViewModel<LoanListViewModel> {
    let content = LoanListViewModel {
        loans: display.entries(shown),
        total_count,
        query,
        stats: stats_view(stats),
    };

    let mut result = CommandResultViewModel::new(content);

    if total_count == 0 {
        result = result
            .with_badge(StatusBadge::info("No borrowed books"))
            .with_suggestion(
                Guidance::new("Browse the catalog to borrow a book").with_command(cmd::CATALOG_LIST),
            );
    } else if stats.overdue > 0 {
        result = result
            .with_badge(StatusBadge::warning(format!(
                "{} overdue loan(s) out of {}",
                stats.overdue, total_count
            )))
            .with_suggestion(
                Guidance::new("Overdue books cannot be renewed; return them")
                    .with_command(cmd::LOANS_RETURN),
            );
    } else {
        result = result.with_badge(StatusBadge::success(format!("{} loan(s)", total_count)));
    }

    result
}

pub fn present_loan_detail(
    display: LoanDisplay<'_>,
    book: &BorrowedBook,
) -> CommandResultViewModel<LoanDetailViewModel> {
    CommandResultViewModel::new(LoanDetailViewModel {
        loan: display.entry(book),
    })
}

pub fn present_renew(
    display: LoanDisplay<'_>,
    id: LoanId,
    outcome: RenewOutcome,
    loans: &[BorrowedBook],
    notifications: Vec<Notification>,
) -> CommandResultViewModel<RenewResultViewModel> {
    let loan = loans.iter().find(|b| b.id == id).map(|b| display.entry(b));
    let badge = badge_for(&notifications, "Renewed");
    let blocked_overdue = outcome == RenewOutcome::RenewalBlockedOverdue;

    let mut result = CommandResultViewModel::new(RenewResultViewModel {
        loan_id: id.get(),
        outcome,
        loan,
    })
    .with_badge(badge)
    .with_notifications(notifications);

    if blocked_overdue {
        result = result.with_suggestion(
            Guidance::new("Return the book to clear the overdue status").with_command(cmd::LOANS_RETURN),
        );
    }
    result
}

pub fn present_return(
    display: LoanDisplay<'_>,
    id: LoanId,
    remaining: &[BorrowedBook],
    notifications: Vec<Notification>,
) -> CommandResultViewModel<ReturnResultViewModel> {
    let badge = badge_for(&notifications, "Returned");
    CommandResultViewModel::new(ReturnResultViewModel {
        loan_id: id.get(),
        remaining: display.entries(remaining),
    })
    .with_badge(badge)
    .with_notifications(notifications)
}

#[cfg(test)]
mod tests {
    use super::*;
    use monlivre_engine::Severity;
    use monlivre_types::{DueStatus, LoanState};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn book(id: i64, due: NaiveDate, renewals: u32, overdue: bool) -> BorrowedBook {
        BorrowedBook {
            id: LoanId::new(id),
            title: format!("Book {}", id),
            author: "Author".to_string(),
            genre: "Genre".to_string(),
            isbn: String::new(),
            cover_url: String::new(),
            borrow_date: None,
            due_date: Some(due),
            renewal_count: renewals,
            max_renewals: 2,
            is_overdue: overdue,
        }
    }

    fn display() -> LoanDisplay<'static> {
        LoanDisplay {
            today: date(2025, 2, 1),
            due_soon_days: 3,
            placeholder_cover: "/placeholder.svg",
        }
    }

    #[test]
    fn test_entry_uses_placeholder_cover() {
        let records = vec![book(1, date(2025, 2, 3), 1, false)];
        let result = present_loan_list(display(), &records, 1, None, DashboardStats::compute(&records, None));

        let entry = &result.content.loans[0];
        assert_eq!(entry.cover_url, "/placeholder.svg");
        assert!(!entry.has_cover);
        assert_eq!(entry.due, DueStatus::DueSoon { days: 2 });
        assert_eq!(entry.state, LoanState::Active);
        assert_eq!(entry.renewals_left, 1);
    }

    #[test]
    fn test_overdue_list_gets_warning_badge() {
        let records = vec![
            book(1, date(2025, 3, 1), 0, false),
            book(2, date(2025, 1, 20), 0, true),
        ];
        let stats = DashboardStats::compute(&records, None);
        let result = present_loan_list(display(), &records, 2, None, stats);

        let badge = result.badge.unwrap();
        assert_eq!(badge.level, Severity::Warning);
        assert_eq!(result.content.loans[1].state, LoanState::Overdue);
        assert!(!result.content.loans[1].can_renew);
    }

    #[test]
    fn test_empty_list_suggests_catalog() {
        let result = present_loan_list(display(), &[], 0, None, DashboardStats::default());
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].command.as_deref(), Some(cmd::CATALOG_LIST));
    }

    #[test]
    fn test_renew_badge_follows_notification() {
        let records = vec![book(2, date(2025, 1, 20), 0, true)];
        let notes = vec![Notification::new(
            Severity::Warning,
            "\"Book 2\" is overdue and cannot be renewed",
        )];
        let result = present_renew(
            display(),
            LoanId::new(2),
            RenewOutcome::RenewalBlockedOverdue,
            &records,
            notes,
        );

        let badge = result.badge.as_ref().unwrap();
        assert_eq!(badge.level, Severity::Warning);
        assert_eq!(result.notifications.len(), 1);
        assert_eq!(result.suggestions.len(), 1);
    }
}
