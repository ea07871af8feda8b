/// Core error types for ShelfMark
use thiserror::Error;

/// Result type alias using `ShelfmarkError`
pub type Result<T> = std::result::Result<T, ShelfmarkError>;

/// Core error type for ShelfMark
///
/// `Parse`, `Connection`, `Auth` and `Config` abort a run. `Service` is
/// recoverable when it happens on a single update call.
#[derive(Error, Debug)]
pub enum ShelfmarkError {
    /// Malformed export file or missing required columns
    #[error("Parse error: {0}")]
    Parse(String),

    /// Network unreachable or request timed out
    #[error("Connection error: {0}")]
    Connection(String),

    /// Credential rejected by the server
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Unexpected status code or response shape
    #[error("Service error: {message}")]
    Service {
        /// HTTP status, when the server answered at all
        status: Option<u16>,
        /// Error details
        message: String,
    },

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl ShelfmarkError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a service error for a malformed or unexpected response
    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service {
            status: None,
            message: msg.into(),
        }
    }

    /// Create a service error for a non-success HTTP status
    pub fn service_status(status: u16, msg: impl Into<String>) -> Self {
        Self::Service {
            status: Some(status),
            message: msg.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether a single retry may succeed: connection failures and 5xx responses.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Service {
                status: Some(status),
                ..
            } => *status >= 500,
            _ => false,
        }
    }
}
