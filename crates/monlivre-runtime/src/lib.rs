pub mod backend;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod session;

pub use backend::{HttpBackend, LibraryBackend, RenewRequest, ReturnRequest, SignupRequest};
pub use client::{AdminConsole, AuthFlow, CatalogPage, MonLivre, StudentDashboard};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, LoanSettings, RenewalMode, resolve_workspace_path};
pub use error::{Error, Result};
pub use session::SessionStore;
