use super::lock;
use crate::backend::LibraryBackend;
use crate::clock::Clock;
use crate::{Error, Result};
use chrono::NaiveDate;
use monlivre_engine::catalog::{self, CatalogQuery};
use monlivre_engine::forms::validate_return_date;
use monlivre_engine::{Notification, NotificationQueue};
use monlivre_types::{BookId, BorrowRequest, CatalogBook, Session, format_fr_date};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct CatalogState {
    books: Vec<CatalogBook>,
    /// Books borrowed from this page since it was opened
    borrowed: Vec<BookId>,
    notifications: NotificationQueue,
}

/// Public catalog: browse, search and borrow
pub struct CatalogPage {
    backend: Arc<dyn LibraryBackend>,
    clock: Arc<dyn Clock>,
    session: Session,
    state: Mutex<CatalogState>,
}

impl CatalogPage {
    /// Browsing needs no session; borrowing does
    pub async fn open(
        backend: Arc<dyn LibraryBackend>,
        clock: Arc<dyn Clock>,
        session: Session,
    ) -> Result<Self> {
        let page = Self {
            backend,
            clock,
            session,
            state: Mutex::new(CatalogState::default()),
        };
        page.reload().await?;
        Ok(page)
    }

    pub async fn reload(&self) -> Result<()> {
        let raw = self.backend.catalog().await?;
        let books = catalog::load(&raw);
        tracing::info!(books = books.len(), "catalog loaded");
        lock(&self.state).books = books;
        Ok(())
    }

    pub fn books(&self) -> Vec<CatalogBook> {
        lock(&self.state).books.clone()
    }

    pub fn book(&self, id: BookId) -> Option<CatalogBook> {
        lock(&self.state).books.iter().find(|b| b.id == id).cloned()
    }

    pub fn search(&self, query: &CatalogQuery) -> Vec<CatalogBook> {
        let state = lock(&self.state);
        catalog::search(&state.books, query).cloned().collect()
    }

    pub fn borrowed_this_session(&self) -> Vec<BookId> {
        lock(&self.state).borrowed.clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.state).notifications.drain()
    }

    /// Borrow book `id` until `return_date`, then refetch the catalog so
    /// available copies are current
    pub async fn borrow(&self, id: BookId, return_date: NaiveDate) -> Result<()> {
        let Some(user) = self.session.user_id() else {
            let err = Error::NotAuthenticated;
            self.notify_error(&err);
            return Err(err);
        };
        let request = match self.prepare_borrow(id, return_date) {
            Ok(request) => request,
            Err(err) => {
                self.notify_error(&err);
                return Err(err);
            }
        };

        if let Err(err) = self.backend.borrow_book(user, &request).await {
            self.notify_error(&err);
            return Err(err);
        }
        tracing::info!(book = %id, until = %return_date, "book borrowed");

        let message = format!(
            "\"{}\" borrowed until {}",
            request.book_name,
            format_fr_date(return_date)
        );
        let refreshed = self.backend.catalog().await;

        let mut state = lock(&self.state);
        state.borrowed.push(id);
        match refreshed {
            Ok(raw) => {
                state.books = catalog::load(&raw);
                state.notifications.success(message);
            }
            Err(err) => {
                tracing::warn!(error = %err, "refetch after borrow failed");
                state.notifications.warning(format!(
                    "{}; the catalog could not be refreshed: {}",
                    message,
                    err.user_message()
                ));
            }
        }
        Ok(())
    }

    fn prepare_borrow(&self, id: BookId, return_date: NaiveDate) -> Result<BorrowRequest> {
        let book = self
            .book(id)
            .ok_or_else(|| Error::NotFound(format!("book {}", id)))?;
        if !book.is_available() {
            return Err(Error::Validation(format!(
                "\"{}\" has no copies available",
                book.title
            )));
        }
        validate_return_date(return_date, self.clock.today())?;

        Ok(BorrowRequest {
            book_id: id,
            book_name: book.title,
            date: return_date,
        })
    }

    fn notify_error(&self, err: &Error) {
        lock(&self.state).notifications.error(err.user_message());
    }
}
