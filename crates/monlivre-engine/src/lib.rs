//! monlivre-engine: view-model logic behind the MonLivre pages.
//!
//! Everything here is a pure function of its inputs. Backend payloads come in
//! as `serde_json::Value`, get normalized into `monlivre-types` models, and
//! the dashboard derives its display state from them. Network calls and
//! session handling live in `monlivre-runtime`.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use monlivre_engine::{loans, RenewOutcome};
//! use monlivre_types::LoanId;
//! use serde_json::json;
//!
//! let payload = json!([
//!     {"id": 1, "title": "Calculus", "author": "Spivak", "genre": "Mathematics",
//!      "due_date": "2025-01-01", "renewal_count": 1}
//! ]);
//! let records = loans::load(&payload);
//!
//! let today = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
//! let (records, outcome) = loans::renew(&records, LoanId::new(1), today)?;
//! assert_eq!(outcome, RenewOutcome::Renewed(NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()));
//! assert_eq!(records[0].renewal_count, 2);
//! # Ok::<(), monlivre_engine::Error>(())
//! ```

pub mod admin;
pub mod catalog;
pub mod error;
pub mod forms;
pub mod loans;
pub mod normalize;
pub mod notify;
pub mod stats;

pub use error::{Error, Result};
pub use loans::{
    LoanMatches, OverduePolicy, RenewOutcome, RenewalPolicy, days_remaining, due_status,
};
pub use notify::{Notification, NotificationQueue, Severity};
pub use stats::DashboardStats;
