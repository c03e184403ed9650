//! REST backend boundary.
//!
//! Every method returns the raw JSON body (or nothing); normalization into
//! domain models happens in `monlivre-engine` so that payload quirks stay in
//! one place.

mod http;

pub use http::HttpBackend;

use crate::Result;
use async_trait::async_trait;
use monlivre_types::{
    AccountId, BookForm, BookId, BorrowRequest, Credentials, StudentForm, UserId,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Body of `POST /user/return-book/{userId}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub book_id: i64,
}

/// Body of `POST /user/renew-book/{userId}`.
///
/// The key lets the backend recognise a resubmitted renewal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewRequest {
    pub book_id: i64,
    pub idempotency_key: Uuid,
}

impl RenewRequest {
    pub fn new(book_id: i64) -> Self {
        Self {
            book_id,
            idempotency_key: Uuid::new_v4(),
        }
    }
}

/// Body of `POST /user/signup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[async_trait]
pub trait LibraryBackend: Send + Sync {
    // Student pages
    async fn borrowed_books(&self, user: &UserId) -> Result<Value>;
    async fn profile(&self, user: &UserId) -> Result<Value>;
    async fn return_book(&self, user: &UserId, request: ReturnRequest) -> Result<()>;
    /// Returns the confirmation body, which may carry the granted due date
    async fn renew_book(&self, user: &UserId, request: RenewRequest) -> Result<Value>;
    async fn catalog(&self) -> Result<Value>;
    async fn borrow_book(&self, user: &UserId, request: &BorrowRequest) -> Result<()>;

    // Authentication
    async fn login(&self, credentials: &Credentials) -> Result<Value>;
    async fn signup(&self, request: &SignupRequest) -> Result<()>;

    // Admin console
    async fn admin_books(&self) -> Result<Value>;
    async fn create_book(&self, form: &BookForm) -> Result<()>;
    async fn update_book(&self, id: BookId, form: &BookForm) -> Result<()>;
    async fn delete_book(&self, id: BookId) -> Result<()>;
    async fn admin_users(&self) -> Result<Value>;
    async fn create_user(&self, form: &StudentForm) -> Result<()>;
    async fn update_user(&self, id: AccountId, form: &StudentForm) -> Result<()>;
    async fn delete_user(&self, id: AccountId) -> Result<()>;
}
