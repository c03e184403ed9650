use super::lock;
use crate::backend::LibraryBackend;
use crate::{Error, Result};
use monlivre_engine::admin;
use monlivre_engine::forms::{validate_book_form, validate_student_form};
use monlivre_engine::{Notification, NotificationQueue};
use monlivre_types::{AccountId, BookForm, BookId, CatalogBook, StudentAccount, StudentForm};
use std::future::Future;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct AdminState {
    books: Vec<CatalogBook>,
    students: Vec<StudentAccount>,
    notifications: NotificationQueue,
}

#[derive(Debug, Clone, Copy)]
enum Collection {
    Books,
    Students,
}

/// Book and student-account management.
///
/// Every mutation is validated locally, sent once, and followed by a refetch
/// of the affected list.
pub struct AdminConsole {
    backend: Arc<dyn LibraryBackend>,
    state: Mutex<AdminState>,
}

impl AdminConsole {
    pub async fn open(backend: Arc<dyn LibraryBackend>) -> Result<Self> {
        let console = Self {
            backend,
            state: Mutex::new(AdminState::default()),
        };
        console.reload().await?;
        Ok(console)
    }

    pub async fn reload(&self) -> Result<()> {
        let (books_raw, users_raw) =
            tokio::try_join!(self.backend.admin_books(), self.backend.admin_users())?;

        let mut state = lock(&self.state);
        state.books = admin::load_books(&books_raw);
        state.students = admin::load_accounts(&users_raw);
        tracing::info!(
            books = state.books.len(),
            students = state.students.len(),
            "admin console loaded"
        );
        Ok(())
    }

    pub fn books(&self) -> Vec<CatalogBook> {
        lock(&self.state).books.clone()
    }

    pub fn students(&self) -> Vec<StudentAccount> {
        lock(&self.state).students.clone()
    }

    pub fn search_books(&self, query: &str) -> Vec<CatalogBook> {
        let state = lock(&self.state);
        admin::filter_books(&state.books, query).cloned().collect()
    }

    pub fn search_students(&self, query: &str) -> Vec<StudentAccount> {
        let state = lock(&self.state);
        admin::filter_students(&state.students, query)
            .cloned()
            .collect()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.state).notifications.drain()
    }

    pub async fn add_book(&self, form: &BookForm) -> Result<()> {
        self.checked(validate_book_form(form))?;
        self.mutate(
            Collection::Books,
            self.backend.create_book(form),
            format!("Book \"{}\" added", form.title),
        )
        .await
    }

    pub async fn update_book(&self, id: BookId, form: &BookForm) -> Result<()> {
        self.checked(validate_book_form(form))?;
        self.mutate(
            Collection::Books,
            self.backend.update_book(id, form),
            format!("Book \"{}\" updated", form.title),
        )
        .await
    }

    pub async fn delete_book(&self, id: BookId) -> Result<()> {
        self.mutate(
            Collection::Books,
            self.backend.delete_book(id),
            format!("Book {} deleted", id),
        )
        .await
    }

    pub async fn add_student(&self, form: &StudentForm) -> Result<()> {
        self.checked(validate_student_form(form))?;
        self.mutate(
            Collection::Students,
            self.backend.create_user(form),
            format!("Student \"{}\" added", form.name),
        )
        .await
    }

    pub async fn update_student(&self, id: AccountId, form: &StudentForm) -> Result<()> {
        self.checked(validate_student_form(form))?;
        self.mutate(
            Collection::Students,
            self.backend.update_user(id, form),
            format!("Student \"{}\" updated", form.name),
        )
        .await
    }

    pub async fn delete_student(&self, id: AccountId) -> Result<()> {
        self.mutate(
            Collection::Students,
            self.backend.delete_user(id),
            format!("Student {} deleted", id),
        )
        .await
    }

    /// Surface a local validation failure as a notification
    fn checked(&self, validation: monlivre_engine::Result<()>) -> Result<()> {
        validation.map_err(|err| {
            let err = Error::from(err);
            lock(&self.state).notifications.error(err.user_message());
            err
        })
    }

    async fn mutate(
        &self,
        collection: Collection,
        request: impl Future<Output = Result<()>>,
        success: String,
    ) -> Result<()> {
        if let Err(err) = request.await {
            lock(&self.state).notifications.error(err.user_message());
            return Err(err);
        }
        tracing::info!(?collection, %success, "admin mutation applied");

        match self.refetch(collection).await {
            Ok(()) => lock(&self.state).notifications.success(success),
            Err(err) => {
                tracing::warn!(error = %err, "refetch after admin mutation failed");
                lock(&self.state).notifications.warning(format!(
                    "{}; the list could not be refreshed: {}",
                    success,
                    err.user_message()
                ));
            }
        }
        Ok(())
    }

    async fn refetch(&self, collection: Collection) -> Result<()> {
        match collection {
            Collection::Books => {
                let raw = self.backend.admin_books().await?;
                lock(&self.state).books = admin::load_books(&raw);
            }
            Collection::Students => {
                let raw = self.backend.admin_users().await?;
                lock(&self.state).students = admin::load_accounts(&raw);
            }
        }
        Ok(())
    }
}
