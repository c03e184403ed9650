//! In-memory backend.
//!
//! Mutations change the stored payloads the way the real server would, so a
//! controller's refetch sees the effect of its own request.

use async_trait::async_trait;
use monlivre_runtime::{Error, LibraryBackend, RenewRequest, Result, ReturnRequest, SignupRequest};
use monlivre_types::{
    AccountId, BookForm, BookId, BorrowRequest, Credentials, StudentForm, UserId,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

use crate::fixtures;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    BorrowedBooks,
    Profile,
    ReturnBook,
    RenewBook,
    Catalog,
    BorrowBook,
    Login,
    Signup,
    AdminBooks,
    CreateBook,
    UpdateBook,
    DeleteBook,
    AdminUsers,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

/// One request as the HTTP backend would have sent it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
enum Failure {
    Rejected { status: u16, message: String },
    Network(String),
}

impl Failure {
    fn to_error(&self) -> Error {
        match self {
            Failure::Rejected { status, message } => Error::BackendRejected {
                status: *status,
                message: message.clone(),
            },
            Failure::Network(message) => Error::Network(message.clone()),
        }
    }
}

struct FakeState {
    loans: Vec<Value>,
    profile: Value,
    books: Vec<Value>,
    users: Vec<Value>,
    login: Value,
    renew_response: Value,
    failures: HashMap<Endpoint, Failure>,
    gates: HashMap<Endpoint, Arc<Notify>>,
    calls: Vec<RecordedCall>,
}

pub struct FakeBackend {
    state: Mutex<FakeState>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    /// Backend preloaded with the fixture payloads
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                loans: as_rows(fixtures::borrowed_books()),
                profile: fixtures::profile(),
                books: as_rows(fixtures::catalog()),
                users: as_rows(fixtures::admin_users()),
                login: fixtures::login_student(),
                renew_response: Value::Null,
                failures: HashMap::new(),
                gates: HashMap::new(),
                calls: Vec::new(),
            }),
        }
    }

    pub fn with_loans(self, loans: Value) -> Self {
        self.lock().loans = as_rows(loans);
        self
    }

    pub fn with_profile(self, profile: Value) -> Self {
        self.lock().profile = profile;
        self
    }

    pub fn with_catalog(self, books: Value) -> Self {
        self.lock().books = as_rows(books);
        self
    }

    pub fn with_login(self, body: Value) -> Self {
        self.lock().login = body;
        self
    }

    /// Body returned by `POST /user/renew-book/{userId}`
    pub fn with_renew_response(self, body: Value) -> Self {
        self.lock().renew_response = body;
        self
    }

    /// Answer every call to `endpoint` with a non-2xx status
    pub fn reject(&self, endpoint: Endpoint, status: u16, message: impl Into<String>) {
        self.lock().failures.insert(
            endpoint,
            Failure::Rejected {
                status,
                message: message.into(),
            },
        );
    }

    /// Fail every call to `endpoint` before it reaches the server
    pub fn disconnect(&self, endpoint: Endpoint, message: impl Into<String>) {
        self.lock()
            .failures
            .insert(endpoint, Failure::Network(message.into()));
    }

    pub fn heal(&self, endpoint: Endpoint) {
        self.lock().failures.remove(&endpoint);
    }

    /// Hold calls to `endpoint` until the returned handle is notified
    pub fn gate(&self, endpoint: Endpoint) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.lock().gates.insert(endpoint, notify.clone());
        notify
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Calls whose path starts with `prefix`
    pub fn calls_to(&self, method: &str, prefix: &str) -> Vec<RecordedCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.method == method && c.path.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn loans(&self) -> Vec<Value> {
        self.lock().loans.clone()
    }

    pub fn books(&self) -> Vec<Value> {
        self.lock().books.clone()
    }

    pub fn users(&self) -> Vec<Value> {
        self.lock().users.clone()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the call, wait on its gate, then apply any configured failure
    async fn enter(
        &self,
        endpoint: Endpoint,
        method: &'static str,
        path: String,
        body: Option<Value>,
    ) -> Result<()> {
        let gate = {
            let mut state = self.lock();
            state.calls.push(RecordedCall { method, path, body });
            state.gates.get(&endpoint).cloned()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match self.lock().failures.get(&endpoint) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

fn as_rows(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(rows) => rows,
        _ => Vec::new(),
    }
}

fn row_id(row: &Value) -> Option<i64> {
    row.get("id").and_then(Value::as_i64)
}

fn next_id(rows: &[Value]) -> i64 {
    rows.iter().filter_map(row_id).max().unwrap_or(0) + 1
}

fn to_value<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[async_trait]
impl LibraryBackend for FakeBackend {
    async fn borrowed_books(&self, user: &UserId) -> Result<Value> {
        self.enter(
            Endpoint::BorrowedBooks,
            "GET",
            format!("/user/borrowed-books/{}", user),
            None,
        )
        .await?;
        Ok(Value::Array(self.lock().loans.clone()))
    }

    async fn profile(&self, user: &UserId) -> Result<Value> {
        self.enter(Endpoint::Profile, "GET", format!("/user/profile/{}", user), None)
            .await?;
        Ok(self.lock().profile.clone())
    }

    async fn return_book(&self, user: &UserId, request: ReturnRequest) -> Result<()> {
        self.enter(
            Endpoint::ReturnBook,
            "POST",
            format!("/user/return-book/{}", user),
            Some(to_value(&request)),
        )
        .await?;
        let mut state = self.lock();
        let before = state.loans.len();
        state.loans.retain(|row| row_id(row) != Some(request.book_id));
        if state.loans.len() == before {
            return Err(Error::BackendRejected {
                status: 404,
                message: "Emprunt introuvable".to_string(),
            });
        }
        Ok(())
    }

    async fn renew_book(&self, user: &UserId, request: RenewRequest) -> Result<Value> {
        self.enter(
            Endpoint::RenewBook,
            "POST",
            format!("/user/renew-book/{}", user),
            Some(to_value(&request)),
        )
        .await?;
        Ok(self.lock().renew_response.clone())
    }

    async fn catalog(&self) -> Result<Value> {
        self.enter(Endpoint::Catalog, "GET", "/user/books".to_string(), None)
            .await?;
        Ok(Value::Array(self.lock().books.clone()))
    }

    async fn borrow_book(&self, user: &UserId, request: &BorrowRequest) -> Result<()> {
        self.enter(
            Endpoint::BorrowBook,
            "POST",
            format!("/user/books/{}/borrow", user),
            Some(to_value(request)),
        )
        .await?;
        let mut state = self.lock();
        let book = state
            .books
            .iter_mut()
            .find(|row| row_id(row) == Some(request.book_id.get()));
        if let Some(row) = book {
            for key in ["available_copies", "availableCopies"] {
                if let Some(copies) = row.get(key).and_then(Value::as_i64) {
                    row[key] = json!(copies - 1);
                }
            }
        }
        Ok(())
    }

    async fn login(&self, credentials: &Credentials) -> Result<Value> {
        self.enter(
            Endpoint::Login,
            "POST",
            "/user/login".to_string(),
            Some(to_value(credentials)),
        )
        .await?;
        Ok(self.lock().login.clone())
    }

    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        self.enter(
            Endpoint::Signup,
            "POST",
            "/user/signup".to_string(),
            Some(to_value(request)),
        )
        .await
    }

    async fn admin_books(&self) -> Result<Value> {
        self.enter(Endpoint::AdminBooks, "GET", "/admin/books".to_string(), None)
            .await?;
        Ok(Value::Array(self.lock().books.clone()))
    }

    async fn create_book(&self, form: &BookForm) -> Result<()> {
        let body = to_value(form);
        self.enter(
            Endpoint::CreateBook,
            "POST",
            "/admin/books".to_string(),
            Some(body.clone()),
        )
        .await?;
        let mut state = self.lock();
        let mut row = body;
        row["id"] = json!(next_id(&state.books));
        state.books.push(row);
        Ok(())
    }

    async fn update_book(&self, id: BookId, form: &BookForm) -> Result<()> {
        let body = to_value(form);
        self.enter(
            Endpoint::UpdateBook,
            "PUT",
            format!("/admin/books/{}", id),
            Some(body.clone()),
        )
        .await?;
        let mut state = self.lock();
        replace_row(&mut state.books, id.get(), body)
    }

    async fn delete_book(&self, id: BookId) -> Result<()> {
        self.enter(
            Endpoint::DeleteBook,
            "DELETE",
            format!("/admin/books/{}", id),
            None,
        )
        .await?;
        self.lock().books.retain(|row| row_id(row) != Some(id.get()));
        Ok(())
    }

    async fn admin_users(&self) -> Result<Value> {
        self.enter(Endpoint::AdminUsers, "GET", "/admin/users".to_string(), None)
            .await?;
        Ok(Value::Array(self.lock().users.clone()))
    }

    async fn create_user(&self, form: &StudentForm) -> Result<()> {
        let body = to_value(form);
        self.enter(
            Endpoint::CreateUser,
            "POST",
            "/admin/users".to_string(),
            Some(body.clone()),
        )
        .await?;
        let mut state = self.lock();
        let mut row = body;
        row["id"] = json!(next_id(&state.users));
        row["borrowed_books"] = json!(0);
        state.users.push(row);
        Ok(())
    }

    async fn update_user(&self, id: AccountId, form: &StudentForm) -> Result<()> {
        let body = to_value(form);
        self.enter(
            Endpoint::UpdateUser,
            "PUT",
            format!("/admin/users/{}", id),
            Some(body.clone()),
        )
        .await?;
        let mut state = self.lock();
        replace_row(&mut state.users, id.get(), body)
    }

    async fn delete_user(&self, id: AccountId) -> Result<()> {
        self.enter(
            Endpoint::DeleteUser,
            "DELETE",
            format!("/admin/users/{}", id),
            None,
        )
        .await?;
        self.lock().users.retain(|row| row_id(row) != Some(id.get()));
        Ok(())
    }
}

/// Merge `body` into the row with `id`, keeping fields the form does not carry
fn replace_row(rows: &mut [Value], id: i64, body: Value) -> Result<()> {
    let Some(row) = rows.iter_mut().find(|row| row_id(row) == Some(id)) else {
        return Err(Error::BackendRejected {
            status: 404,
            message: format!("Élément {} introuvable", id),
        });
    };
    if let (Some(target), Value::Object(fields)) = (row.as_object_mut(), body) {
        target.extend(fields);
    }
    Ok(())
}
