use chrono::NaiveDate;
use monlivre_engine::loans::{self, days_remaining};
use monlivre_engine::{DashboardStats, RenewOutcome};
use monlivre_types::{BorrowedBook, DueStatus, LoanId, LoanState};
use std::fs;
use std::path::Path;

// Helper to load a raw backend payload from fixture JSON
fn load_fixture(fixture_name: &str) -> Vec<BorrowedBook> {
    let path = Path::new("tests/fixtures").join(fixture_name);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to read fixture: {}", path.display()));
    let payload: serde_json::Value = serde_json::from_str(&content)
        .unwrap_or_else(|_| panic!("Failed to parse fixture: {}", path.display()));
    loans::load(&payload)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_mixed_naming_payload_normalization() {
    let records = load_fixture("borrowed_books.json");

    assert_eq!(records.len(), 3);

    insta::assert_json_snapshot!("borrowed_books_normalized", records);
}

#[test]
fn test_dashboard_walkthrough() {
    let today = date(2025, 2, 1);
    let records = load_fixture("borrowed_books.json");

    let stats = DashboardStats::compute(&records, None);
    assert_eq!(stats.borrowed, 3);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.renewals, 1);

    let states: Vec<LoanState> = records.iter().map(BorrowedBook::state).collect();
    assert_eq!(
        states,
        vec![LoanState::Active, LoanState::Overdue, LoanState::Active]
    );

    // The backend flag wins even though the due date is still ahead
    assert_eq!(
        loans::due_status(&records[1], today, 3),
        DueStatus::Overdue { days_late: 0 }
    );
    assert_eq!(
        loans::due_status(&records[2], today, 3),
        DueStatus::OnTime { days: 18 }
    );

    // Overdue loan cannot be renewed
    let (same, outcome) = loans::renew(&records, LoanId::new(2), today).unwrap();
    assert_eq!(outcome, RenewOutcome::RenewalBlockedOverdue);
    assert_eq!(same, records);

    // Last renewal for the first loan
    let (records, outcome) = loans::renew(&records, LoanId::new(1), today).unwrap();
    assert_eq!(outcome, RenewOutcome::Renewed(date(2025, 3, 3)));
    assert_eq!(records[0].renewal_count, 2);
    assert_eq!(records[0].state(), LoanState::RenewalExhausted);

    let (records, outcome) = loans::renew(&records, LoanId::new(1), today).unwrap();
    assert_eq!(outcome, RenewOutcome::RenewalLimitReached);

    // Returning the overdue loan removes exactly that record
    let records = loans::remove_returned(&records, LoanId::new(2)).unwrap();
    assert_eq!(records.len(), 2);
    assert!(loans::remove_returned(&records, LoanId::new(2)).is_err());

    let matches = loans::filter(&records, "HUGO");
    assert_eq!(matches.iter().map(|b| b.id).collect::<Vec<_>>(), vec![LoanId::new(3)]);
}

#[test]
fn test_days_remaining_scenario() {
    assert_eq!(days_remaining(date(2025, 1, 1), date(2025, 1, 10)), -9);
}
