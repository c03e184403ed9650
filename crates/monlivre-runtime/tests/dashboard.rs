use chrono::NaiveDate;
use monlivre_engine::{OverduePolicy, RenewOutcome, Severity};
use monlivre_runtime::{
    Error, FixedClock, LibraryBackend, LoanSettings, RenewalMode, StudentDashboard,
};
use monlivre_testing::{Endpoint, FakeBackend, fixtures};
use monlivre_types::{LoanId, LoanState, Session};
use serde_json::json;
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn open_with(
    backend: Arc<FakeBackend>,
    settings: LoanSettings,
) -> monlivre_runtime::Result<StudentDashboard> {
    StudentDashboard::open(
        backend as Arc<dyn LibraryBackend>,
        Arc::new(FixedClock(fixtures::today())),
        &Session::student(fixtures::STUDENT_ID),
        settings,
    )
    .await
}

async fn open(backend: Arc<FakeBackend>) -> StudentDashboard {
    open_with(backend, LoanSettings::default()).await.unwrap()
}

#[tokio::test]
async fn test_open_requires_session() {
    let backend = Arc::new(FakeBackend::new());
    let result = StudentDashboard::open(
        backend.clone(),
        Arc::new(FixedClock(fixtures::today())),
        &Session::Unauthenticated,
        LoanSettings::default(),
    )
    .await;

    assert!(matches!(result, Err(Error::NotAuthenticated)));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_open_loads_profile_and_loans() {
    let backend = Arc::new(FakeBackend::new());
    let dashboard = open(backend.clone()).await;

    let loans = dashboard.loans();
    assert_eq!(loans.len(), 3);
    assert_eq!(loans[1].state(), LoanState::Overdue);

    let profile = dashboard.profile().unwrap();
    assert_eq!(profile.student_id, "ETU-2024-042");
    assert_eq!(profile.max_books, 5);

    let stats = dashboard.stats();
    assert_eq!(stats.borrowed, 3);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.renewals, 1);
    assert_eq!(stats.available_slots, Some(2));

    assert_eq!(backend.calls_to("GET", "/user/profile/42").len(), 1);
    assert_eq!(backend.calls_to("GET", "/user/borrowed-books/42").len(), 1);
    assert!(dashboard.notifications().is_empty());
}

#[tokio::test]
async fn test_open_fails_when_loans_cannot_be_fetched() {
    let backend = Arc::new(FakeBackend::new());
    backend.reject(Endpoint::BorrowedBooks, 500, "Erreur serveur");

    let result = open_with(backend, LoanSettings::default()).await;
    assert!(matches!(
        result,
        Err(Error::BackendRejected { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_renew_waits_for_backend_confirmation() {
    let backend = Arc::new(FakeBackend::new());
    let dashboard = open(backend.clone()).await;

    let outcome = dashboard.renew(LoanId::new(1)).await.unwrap();
    assert_eq!(outcome, RenewOutcome::Renewed(date(2025, 3, 3)));

    let loans = dashboard.loans();
    assert_eq!(loans[0].due_date, Some(date(2025, 3, 3)));
    assert_eq!(loans[0].renewal_count, 2);
    assert_eq!(loans[0].state(), LoanState::RenewalExhausted);

    let calls = backend.calls_to("POST", "/user/renew-book/42");
    assert_eq!(calls.len(), 1);
    let body = calls[0].body.as_ref().unwrap();
    assert_eq!(body["book_id"], json!(1));
    assert!(body["idempotency_key"].as_str().is_some());

    let notifications = dashboard.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Success);
    assert!(notifications[0].message.contains("03/03/2025"));
}

#[tokio::test]
async fn test_renew_uses_due_date_granted_by_backend() {
    let backend = Arc::new(
        FakeBackend::new().with_renew_response(json!({"message": "ok", "due_date": "2025-03-10"})),
    );
    let dashboard = open(backend).await;

    let outcome = dashboard.renew(LoanId::new(3)).await.unwrap();
    assert_eq!(outcome, RenewOutcome::Renewed(date(2025, 3, 10)));
    assert_eq!(dashboard.loans()[2].due_date, Some(date(2025, 3, 10)));
}

#[tokio::test]
async fn test_blocked_renewals_never_reach_backend() {
    let backend = Arc::new(FakeBackend::new());
    let dashboard = open(backend.clone()).await;
    let before = dashboard.loans();

    let outcome = dashboard.renew(LoanId::new(2)).await.unwrap();
    assert_eq!(outcome, RenewOutcome::RenewalBlockedOverdue);

    let outcome = dashboard.renew(LoanId::new(99)).await.unwrap();
    assert_eq!(outcome, RenewOutcome::NotFound);

    assert_eq!(dashboard.loans(), before);
    assert!(backend.calls_to("POST", "/user/renew-book").is_empty());

    let severities: Vec<Severity> = dashboard
        .notifications()
        .into_iter()
        .map(|n| n.severity)
        .collect();
    assert_eq!(severities, vec![Severity::Warning, Severity::Error]);
}

#[tokio::test]
async fn test_renewal_limit_reached_after_two_renewals() {
    let backend = Arc::new(FakeBackend::new());
    let dashboard = open(backend.clone()).await;

    assert!(dashboard.renew(LoanId::new(1)).await.unwrap().is_renewed());
    let outcome = dashboard.renew(LoanId::new(1)).await.unwrap();
    assert_eq!(outcome, RenewOutcome::RenewalLimitReached);
    assert_eq!(backend.calls_to("POST", "/user/renew-book").len(), 1);
}

#[tokio::test]
async fn test_rejected_renewal_keeps_state() {
    let backend = Arc::new(FakeBackend::new());
    let dashboard = open(backend.clone()).await;
    backend.reject(Endpoint::RenewBook, 409, "Renouvellement refusé");
    let before = dashboard.loans();

    let err = dashboard.renew(LoanId::new(1)).await.unwrap_err();
    assert!(matches!(err, Error::BackendRejected { status: 409, .. }));
    assert_eq!(dashboard.loans(), before);

    let notifications = dashboard.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Error);
    assert_eq!(notifications[0].message, "Renouvellement refusé");
}

#[tokio::test]
async fn test_advisory_renewal_skips_backend() {
    let backend = Arc::new(FakeBackend::new());
    let settings = LoanSettings {
        renewal_mode: RenewalMode::Advisory,
        ..LoanSettings::default()
    };
    let dashboard = open_with(backend.clone(), settings).await.unwrap();

    let outcome = dashboard.renew(LoanId::new(3)).await.unwrap();
    assert_eq!(outcome, RenewOutcome::Renewed(date(2025, 3, 3)));
    assert_eq!(dashboard.loans()[2].renewal_count, 1);
    assert!(backend.calls_to("POST", "/user/renew-book").is_empty());
}

#[tokio::test]
async fn test_custom_renewal_period() {
    let backend = Arc::new(FakeBackend::new());
    let settings = LoanSettings {
        renewal_days: 14,
        ..LoanSettings::default()
    };
    let dashboard = open_with(backend, settings).await.unwrap();

    let outcome = dashboard.renew(LoanId::new(3)).await.unwrap();
    assert_eq!(outcome, RenewOutcome::Renewed(date(2025, 2, 15)));
}

#[tokio::test]
async fn test_out_of_range_renewal_period_fails_without_panicking() {
    let backend = Arc::new(FakeBackend::new());
    let settings = LoanSettings {
        renewal_mode: RenewalMode::Advisory,
        renewal_days: 10_000_000_000,
        ..LoanSettings::default()
    };
    let dashboard = open_with(backend, settings).await.unwrap();
    let before = dashboard.loans();

    let err = dashboard.renew(LoanId::new(3)).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(dashboard.loans(), before);

    let notifications = dashboard.notifications();
    assert_eq!(notifications.last().map(|n| n.severity), Some(Severity::Error));
}

#[tokio::test]
async fn test_return_removes_loan_and_refetches() {
    let backend = Arc::new(FakeBackend::new());
    let dashboard = open(backend.clone()).await;

    dashboard.return_book(LoanId::new(3)).await.unwrap();

    let ids: Vec<i64> = dashboard.loans().iter().map(|b| b.id.get()).collect();
    assert_eq!(ids, vec![1, 2]);

    let returns = backend.calls_to("POST", "/user/return-book/42");
    assert_eq!(returns.len(), 1);
    assert_eq!(returns[0].body, Some(json!({"book_id": 3})));
    assert_eq!(backend.calls_to("GET", "/user/borrowed-books/42").len(), 2);

    let notifications = dashboard.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Success);
}

#[tokio::test]
async fn test_return_keeps_local_state_when_refetch_fails() {
    let backend = Arc::new(FakeBackend::new());
    let dashboard = open(backend.clone()).await;
    backend.disconnect(Endpoint::BorrowedBooks, "connection reset");

    dashboard.return_book(LoanId::new(1)).await.unwrap();
    assert_eq!(dashboard.loans().len(), 2);

    let notifications = dashboard.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].severity, Severity::Warning);
    assert!(notifications[0].message.contains("Calculus"));
}

#[tokio::test]
async fn test_failed_return_keeps_loan() {
    let backend = Arc::new(FakeBackend::new());
    let dashboard = open(backend.clone()).await;
    backend.disconnect(Endpoint::ReturnBook, "connection refused");

    let err = dashboard.return_book(LoanId::new(1)).await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
    assert_eq!(dashboard.loans().len(), 3);
    assert_eq!(dashboard.notifications().len(), 1);
}

#[tokio::test]
async fn test_return_unknown_loan_is_not_sent() {
    let backend = Arc::new(FakeBackend::new());
    let dashboard = open(backend.clone()).await;

    let err = dashboard.return_book(LoanId::new(99)).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(backend.calls_to("POST", "/user/return-book").is_empty());
}

#[tokio::test]
async fn test_second_action_on_same_loan_is_refused_while_in_flight() {
    let backend = Arc::new(FakeBackend::new());
    let dashboard = open(backend.clone()).await;
    let gate = backend.gate(Endpoint::ReturnBook);

    let (first, second) = tokio::join!(dashboard.return_book(LoanId::new(1)), async {
        let second = dashboard.renew(LoanId::new(1)).await;
        gate.notify_one();
        second
    });

    assert!(first.is_ok());
    assert!(matches!(second, Err(Error::ActionInFlight(id)) if id == LoanId::new(1)));
    assert_eq!(backend.calls_to("POST", "/user/return-book").len(), 1);
    assert!(backend.calls_to("POST", "/user/renew-book").is_empty());

    // The guard is released once the first action completes
    let outcome = dashboard.renew(LoanId::new(3)).await.unwrap();
    assert!(outcome.is_renewed());
}

#[tokio::test]
async fn test_derived_overdue_policy_recomputes_flag() {
    let backend = Arc::new(FakeBackend::new().with_loans(json!([
        {"id": 1, "title": "A", "author": "X", "genre": "G", "due_date": "2025-01-25", "is_overdue": false},
        {"id": 2, "title": "B", "author": "Y", "genre": "G", "due_date": "2025-02-10", "is_overdue": true}
    ])));
    let settings = LoanSettings {
        overdue_policy: OverduePolicy::Derived,
        ..LoanSettings::default()
    };
    let dashboard = open_with(backend, settings).await.unwrap();

    let flags: Vec<bool> = dashboard.loans().iter().map(|b| b.is_overdue).collect();
    assert_eq!(flags, vec![true, false]);
}

#[tokio::test]
async fn test_search_filters_loaded_loans() {
    let backend = Arc::new(FakeBackend::new());
    let dashboard = open(backend).await;

    let titles: Vec<String> = dashboard
        .search("calc")
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(titles, vec!["Calculus".to_string()]);
    assert_eq!(dashboard.search("").len(), 3);
}
