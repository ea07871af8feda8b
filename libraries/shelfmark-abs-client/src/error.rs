//! Error types for the Audiobookshelf client.

use shelfmark_core::ShelfmarkError;
use thiserror::Error;

/// Errors that can occur when interacting with an Audiobookshelf server.
#[derive(Error, Debug)]
pub enum AbsClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// API key rejected (401/403)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid server URL or missing API key
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline, unreachable, or did not answer in time
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Configured library does not exist or is not a book library
    #[error("Library not found: {0}")]
    LibraryNotFound(String),
}

impl AbsClientError {
    /// Classify a transport failure while sending or reading a body
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

impl From<AbsClientError> for ShelfmarkError {
    fn from(err: AbsClientError) -> Self {
        match err {
            AbsClientError::Request(e) if e.is_decode() => ShelfmarkError::service(e.to_string()),
            AbsClientError::Request(e) => ShelfmarkError::connection(e.to_string()),
            AbsClientError::ServerUnreachable(msg) => ShelfmarkError::connection(msg),
            AbsClientError::AuthFailed(msg) => ShelfmarkError::auth(msg),
            AbsClientError::ServerError { status, message } => {
                ShelfmarkError::service_status(status, message)
            }
            AbsClientError::InvalidConfig(msg) => ShelfmarkError::config(msg),
            AbsClientError::ParseError(msg) => ShelfmarkError::service(msg),
            AbsClientError::LibraryNotFound(id) => {
                ShelfmarkError::service(format!("library not found: {}", id))
            }
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, AbsClientError>;
