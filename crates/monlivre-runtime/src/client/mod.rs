mod admin;
mod auth;
mod catalog;
mod dashboard;
mod workspace;

pub use admin::AdminConsole;
pub use auth::AuthFlow;
pub use catalog::CatalogPage;
pub use dashboard::StudentDashboard;
pub use workspace::MonLivre;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Page state is plain data, so a panic elsewhere never leaves it unusable
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
