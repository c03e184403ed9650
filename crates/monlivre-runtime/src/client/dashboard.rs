use super::lock;
use crate::backend::{LibraryBackend, RenewRequest, ReturnRequest};
use crate::clock::Clock;
use crate::config::{LoanSettings, RenewalMode};
use crate::{Error, Result};
use chrono::NaiveDate;
use monlivre_engine::normalize::normalize_profile;
use monlivre_engine::{
    DashboardStats, Notification, NotificationQueue, RenewOutcome, due_status, loans,
};
use monlivre_types::{
    BorrowedBook, DueStatus, LoanId, Session, StudentProfile, UserId, format_fr_date,
    parse_calendar_date,
};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct DashboardState {
    profile: Option<StudentProfile>,
    loans: Vec<BorrowedBook>,
    notifications: NotificationQueue,
}

/// The student's "my loans" page: profile header, borrowed books, renew and return
pub struct StudentDashboard {
    backend: Arc<dyn LibraryBackend>,
    clock: Arc<dyn Clock>,
    settings: LoanSettings,
    user: UserId,
    state: Mutex<DashboardState>,
    in_flight: Mutex<HashSet<LoanId>>,
}

impl StudentDashboard {
    /// Fetch profile and borrowed books for the session's user
    pub async fn open(
        backend: Arc<dyn LibraryBackend>,
        clock: Arc<dyn Clock>,
        session: &Session,
        settings: LoanSettings,
    ) -> Result<Self> {
        let user = session.user_id().cloned().ok_or(Error::NotAuthenticated)?;

        let dashboard = Self {
            backend,
            clock,
            settings,
            user,
            state: Mutex::new(DashboardState::default()),
            in_flight: Mutex::new(HashSet::new()),
        };
        dashboard.reload().await?;
        Ok(dashboard)
    }

    /// Refetch profile and loans, replacing the in-memory state on success
    pub async fn reload(&self) -> Result<()> {
        let (profile_raw, loans_raw) = tokio::try_join!(
            self.backend.profile(&self.user),
            self.backend.borrowed_books(&self.user)
        )?;

        let today = self.clock.today();
        let profile = normalize_profile(&profile_raw, &self.user, today);
        let records = self.load_loans(&loans_raw, today);
        tracing::info!(user = %self.user, loans = records.len(), "dashboard loaded");

        let mut state = lock(&self.state);
        state.profile = Some(profile);
        state.loans = records;
        Ok(())
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn settings(&self) -> &LoanSettings {
        &self.settings
    }

    pub fn profile(&self) -> Option<StudentProfile> {
        lock(&self.state).profile.clone()
    }

    pub fn loans(&self) -> Vec<BorrowedBook> {
        lock(&self.state).loans.clone()
    }

    /// Loans whose title, author or genre contains `query`
    pub fn search(&self, query: &str) -> Vec<BorrowedBook> {
        let state = lock(&self.state);
        loans::filter(&state.loans, query).iter().cloned().collect()
    }

    pub fn stats(&self) -> DashboardStats {
        let state = lock(&self.state);
        DashboardStats::compute(&state.loans, state.profile.as_ref())
    }

    pub fn due_status(&self, book: &BorrowedBook) -> DueStatus {
        due_status(book, self.clock.today(), self.settings.due_soon_days)
    }

    /// Take every pending notification, oldest first
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.state).notifications.drain()
    }

    /// Renew loan `id`.
    ///
    /// Blocked renewals are reported through the returned outcome and a
    /// warning notification; transport and backend failures are errors.
    pub async fn renew(&self, id: LoanId) -> Result<RenewOutcome> {
        let _guard = match InFlight::acquire(&self.in_flight, id) {
            Ok(guard) => guard,
            Err(err) => {
                self.notify_error(&err);
                return Err(err);
            }
        };

        let policy = self.settings.renewal_policy();
        let today = self.clock.today();

        let (blocked, title) = {
            let state = lock(&self.state);
            let title = state
                .loans
                .iter()
                .find(|b| b.id == id)
                .map(|b| b.title.clone());
            (policy.check(&state.loans, id), title)
        };
        if let Some(outcome) = blocked {
            self.notify_blocked(id, outcome);
            return Ok(outcome);
        }
        let title = title.unwrap_or_default();

        let granted = match self.settings.renewal_mode {
            RenewalMode::Advisory => {
                tracing::warn!(loan = %id, "advisory renewal applied without backend confirmation");
                policy.extended_due_date(today).map_err(Error::from)
            }
            RenewalMode::Backend => {
                let request = RenewRequest::new(id.get());
                tracing::debug!(loan = %id, key = %request.idempotency_key, "requesting renewal");
                self.backend
                    .renew_book(&self.user, request)
                    .await
                    .and_then(|body| match granted_due_date(&body) {
                        Some(due) => Ok(due),
                        None => policy.extended_due_date(today).map_err(Error::from),
                    })
            }
        };
        let new_due = match granted {
            Ok(due) => due,
            Err(err) => {
                self.notify_error(&err);
                return Err(err);
            }
        };

        let mut state = lock(&self.state);
        match loans::apply_renewal(&state.loans, id, new_due) {
            Ok(mut updated) => {
                self.settings.overdue_policy.apply(&mut updated, today);
                state.loans = updated;
            }
            Err(err) => {
                // The loan vanished from the view while the request was out
                let err = Error::from(err);
                state.notifications.error(err.user_message());
                return Err(err);
            }
        }
        state.notifications.success(format!(
            "\"{}\" renewed until {}",
            title,
            format_fr_date(new_due)
        ));
        tracing::info!(loan = %id, due = %new_due, "loan renewed");
        Ok(RenewOutcome::Renewed(new_due))
    }

    /// Return loan `id`, then refetch the list.
    ///
    /// A failed refetch keeps the locally updated list.
    pub async fn return_book(&self, id: LoanId) -> Result<()> {
        let _guard = match InFlight::acquire(&self.in_flight, id) {
            Ok(guard) => guard,
            Err(err) => {
                self.notify_error(&err);
                return Err(err);
            }
        };

        let title = {
            let state = lock(&self.state);
            state.loans.iter().find(|b| b.id == id).map(|b| b.title.clone())
        };
        let Some(title) = title else {
            let err = Error::NotFound(format!("loan {}", id));
            self.notify_error(&err);
            return Err(err);
        };

        if let Err(err) = self
            .backend
            .return_book(&self.user, ReturnRequest { book_id: id.get() })
            .await
        {
            self.notify_error(&err);
            return Err(err);
        }

        {
            let mut state = lock(&self.state);
            if let Ok(remaining) = loans::remove_returned(&state.loans, id) {
                state.loans = remaining;
            }
        }
        tracing::info!(loan = %id, "book returned");

        let message = format!("\"{}\" returned", title);
        match self.backend.borrowed_books(&self.user).await {
            Ok(raw) => {
                let records = self.load_loans(&raw, self.clock.today());
                let mut state = lock(&self.state);
                state.loans = records;
                state.notifications.success(message);
            }
            Err(err) => {
                tracing::warn!(error = %err, "refetch after return failed");
                lock(&self.state).notifications.warning(format!(
                    "{}; the list could not be refreshed: {}",
                    message,
                    err.user_message()
                ));
            }
        }
        Ok(())
    }

    fn load_loans(&self, raw: &Value, today: NaiveDate) -> Vec<BorrowedBook> {
        let mut records = loans::load(raw);
        self.settings.overdue_policy.apply(&mut records, today);
        records
    }

    fn notify_error(&self, err: &Error) {
        lock(&self.state).notifications.error(err.user_message());
    }

    fn notify_blocked(&self, id: LoanId, outcome: RenewOutcome) {
        let mut state = lock(&self.state);
        match outcome {
            RenewOutcome::NotFound => state.notifications.error(format!("Loan {} not found", id)),
            RenewOutcome::RenewalBlockedOverdue => state
                .notifications
                .warning("An overdue book cannot be renewed. Please return it first."),
            RenewOutcome::RenewalLimitReached => state
                .notifications
                .warning("Maximum number of renewals reached for this book."),
            RenewOutcome::Renewed(_) => {}
        }
    }
}

/// Due date carried by a renewal confirmation, if any
fn granted_due_date(body: &Value) -> Option<NaiveDate> {
    ["due_date", "dueDate", "new_due_date"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .and_then(parse_calendar_date)
}

/// Marks a loan busy until dropped
struct InFlight<'a> {
    set: &'a Mutex<HashSet<LoanId>>,
    id: LoanId,
}

impl<'a> InFlight<'a> {
    fn acquire(set: &'a Mutex<HashSet<LoanId>>, id: LoanId) -> Result<Self> {
        if !lock(set).insert(id) {
            return Err(Error::ActionInFlight(id));
        }
        Ok(Self { set, id })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.set).remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_granted_due_date_reads_either_convention() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 3);
        assert_eq!(granted_due_date(&json!({"due_date": "2025-03-03"})), expected);
        assert_eq!(
            granted_due_date(&json!({"dueDate": "2025-03-03T00:00:00.000Z"})),
            expected
        );
        assert_eq!(granted_due_date(&json!({"message": "ok"})), None);
        assert_eq!(granted_due_date(&Value::Null), None);
    }

    #[test]
    fn test_in_flight_guard_releases_on_drop() {
        let set = Mutex::new(HashSet::new());
        let id = LoanId::new(7);
        {
            let _first = InFlight::acquire(&set, id).unwrap();
            assert!(matches!(
                InFlight::acquire(&set, id),
                Err(Error::ActionInFlight(_))
            ));
        }
        assert!(InFlight::acquire(&set, id).is_ok());
    }
}
