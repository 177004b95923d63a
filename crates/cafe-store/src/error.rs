//! Error types for cafe-store

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    RequestError(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Transaction not found: {id}")]
    NotFound { id: String },

    #[error("Rejected by store: {0}")]
    BadRequest(String),

    #[error("Store server error {0}: {1}")]
    ServerError(u16, String),

    #[error("HTTP error {0}: {1}")]
    HttpError(u16, String),

    #[error("Failed to decode response: {0}")]
    DeserializationError(String),

    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Whether retrying the same call later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::RequestError(_) | StoreError::Timeout | StoreError::ServerError(..)
        )
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            StoreError::Timeout
        } else if error.is_decode() {
            StoreError::DeserializationError(error.to_string())
        } else {
            StoreError::RequestError(error.to_string())
        }
    }
}

/// Result type with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
