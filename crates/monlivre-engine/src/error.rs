use monlivre_types::LoanId;
use std::fmt;

/// Result type for monlivre-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the view-model layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No loan with this id in the current set
    NotFound(LoanId),

    /// A client-side precondition failed (missing form field, bad date, ...)
    Validation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(id) => write!(f, "Loan not found: {}", id),
            Error::Validation(msg) => write!(f, "Validation failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
