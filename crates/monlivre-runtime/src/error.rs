use monlivre_types::LoanId;
use std::fmt;

/// Result type for monlivre-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// The request could not complete (connection refused, timeout, TLS, ...)
    Network(String),

    /// The backend answered with a non-success status
    BackendRejected { status: u16, message: String },

    /// The backend answered 2xx but the body was not what the client expects
    UnexpectedResponse(String),

    /// No user id in the local session
    NotAuthenticated,

    /// A client-side precondition failed
    Validation(String),

    /// The referenced loan, book or account is not in the current view
    NotFound(String),

    /// Another action on the same loan has not completed yet
    ActionInFlight(LoanId),

    /// Configuration error
    Config(String),

    /// IO operation failed
    Io(std::io::Error),

    /// JSON encoding or decoding failed
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Network(msg) => write!(f, "Network error: {}", msg),
            Error::BackendRejected { status, message } => {
                write!(f, "Backend rejected the request ({}): {}", status, message)
            }
            Error::UnexpectedResponse(msg) => write!(f, "Unexpected backend response: {}", msg),
            Error::NotAuthenticated => write!(f, "Not authenticated. Please log in first."),
            Error::Validation(msg) => write!(f, "Validation failed: {}", msg),
            Error::NotFound(what) => write!(f, "Not found: {}", what),
            Error::ActionInFlight(id) => {
                write!(f, "An action on loan {} is already in progress", id)
            }
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl Error {
    /// Short text suitable for a notification; backend bodies are shown as-is
    pub fn user_message(&self) -> String {
        match self {
            Error::BackendRejected { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Stable snake_case name of the variant, used in JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Network(_) => "network",
            Error::BackendRejected { .. } => "backend_rejected",
            Error::UnexpectedResponse(_) => "unexpected_response",
            Error::NotAuthenticated => "not_authenticated",
            Error::Validation(_) => "validation",
            Error::NotFound(_) => "not_found",
            Error::ActionInFlight(_) => "action_in_flight",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
        }
    }

    /// HTTP status for backend rejections
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::BackendRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<monlivre_engine::Error> for Error {
    fn from(err: monlivre_engine::Error) -> Self {
        match err {
            monlivre_engine::Error::NotFound(id) => Error::NotFound(format!("loan {}", id)),
            monlivre_engine::Error::Validation(msg) => Error::Validation(msg),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Error::BackendRejected {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Error::UnexpectedResponse(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
