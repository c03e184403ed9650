use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, UserId};

/// Borrowing limit applied when the profile payload omits `max_books`
pub const DEFAULT_MAX_BOOKS: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Suspended,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Suspended => "suspended",
        }
    }
}

/// Profile of the logged-in student, shown on the dashboard header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub registration_date: Option<NaiveDate>,
    pub status: AccountStatus,
    pub max_books: u32,
}

/// Student account row in the admin console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAccount {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub borrowed_books: u32,
}

/// Admin form for creating or editing a student account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Sign-up form; `confirm_password` never leaves the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginGrant {
    pub user_id: UserId,
    pub is_admin: bool,
}
