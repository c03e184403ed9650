use std::fmt;

/// Result type for monlivre-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An identifier could not be parsed from user input
    InvalidId(String),

    /// A calendar date could not be parsed from user input
    InvalidDate(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidId(raw) => write!(f, "Invalid identifier: {}", raw),
            Error::InvalidDate(raw) => write!(f, "Invalid date (expected YYYY-MM-DD): {}", raw),
        }
    }
}

impl std::error::Error for Error {}
