//! Error types for cafe-core
//!
//! This module provides error handling for the register: error codes,
//! severities, detailed messages with suggestions, and a logger seam so
//! every failed store call is reported the same way.

use cafe_store::StoreError;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Operator input rejected before any store call
    ValidationError,
    /// Filter parameter could not be parsed
    InvalidFilter,
    /// Delete password rejected
    Unauthorized,
    /// Transaction not found
    TransactionNotFound,
    /// Operation not valid in the current state
    InvalidState,
    /// Store could not be reached or timed out
    StoreUnavailable,
    /// Store refused the request
    StoreRejected,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::InvalidFilter => write!(f, "INVALID_FILTER"),
            ErrorCode::Unauthorized => write!(f, "UNAUTHORIZED"),
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::InvalidState => write!(f, "INVALID_STATE"),
            ErrorCode::StoreUnavailable => write!(f, "STORE_UNAVAILABLE"),
            ErrorCode::StoreRejected => write!(f, "STORE_REJECTED"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for cafe-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{message}")]
    ValidationError { field: String, message: String },

    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    #[error("Incorrect password")]
    Unauthorized,

    #[error("{message}")]
    InvalidState { message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    /// Shorthand for a field validation failure
    pub fn validation(field: &str, message: &str) -> Self {
        CoreError::ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::InvalidFilter { .. } => ErrorCode::InvalidFilter,
            CoreError::Unauthorized => ErrorCode::Unauthorized,
            CoreError::InvalidState { .. } => ErrorCode::InvalidState,
            CoreError::Store(inner) => match inner {
                StoreError::NotFound { .. } => ErrorCode::TransactionNotFound,
                StoreError::BadRequest(_) | StoreError::Unauthorized(_) => ErrorCode::StoreRejected,
                StoreError::InvalidConfig(_) | StoreError::DeserializationError(_) => {
                    ErrorCode::InternalError
                }
                _ => ErrorCode::StoreUnavailable,
            },
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::ValidationError { .. } => ErrorSeverity::Info,
            CoreError::InvalidFilter { .. } => ErrorSeverity::Info,
            CoreError::Unauthorized => ErrorSeverity::Warning,
            CoreError::InvalidState { .. } => ErrorSeverity::Info,
            CoreError::Store(StoreError::NotFound { .. }) => ErrorSeverity::Warning,
            CoreError::Store(_) => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::ValidationError { field, .. } => {
                details = details.with_detail(serde_json::json!({ "field": field }));
            }
            CoreError::InvalidFilter { .. } => {
                details = details.with_suggestion(
                    "Dates use YYYY-MM-DD and times use HH:MM or HH:MM:SS.".to_string()
                );
            }
            CoreError::Store(StoreError::NotFound { .. }) => {
                details = details.with_suggestion(
                    "The record may have been removed by another operator; reload the list.".to_string()
                );
            }
            CoreError::Store(inner) if inner.is_transient() => {
                details = details.with_suggestion(
                    "Nothing was changed. Check the connection and try again.".to_string()
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Error => log::error!(
                target: "cafe::error",
                "ERROR [{}] {} - Operation: {} - Data: {}",
                error.code(),
                error,
                context.operation,
                context.data
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "cafe::error",
                "WARNING [{}] {} - Operation: {} - Data: {}",
                error.code(),
                error,
                context.operation,
                context.data
            ),
            ErrorSeverity::Info => log::info!(
                target: "cafe::error",
                "[{}] {} - Operation: {}",
                error.code(),
                error,
                context.operation
            ),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::TransactionNotFound.to_string(), "TRANSACTION_NOT_FOUND");
        assert_eq!(ErrorCode::StoreUnavailable.to_string(), "STORE_UNAVAILABLE");
    }

    #[test]
    fn test_error_severity_display() {
        assert_eq!(ErrorSeverity::Info.to_string(), "info");
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
        assert_eq!(ErrorSeverity::Error.to_string(), "error");
    }

    #[test]
    fn test_store_error_codes() {
        let error = CoreError::from(StoreError::NotFound { id: "abc".to_string() });
        assert_eq!(error.code(), ErrorCode::TransactionNotFound);
        assert_eq!(error.severity(), ErrorSeverity::Warning);

        let error = CoreError::from(StoreError::Timeout);
        assert_eq!(error.code(), ErrorCode::StoreUnavailable);
        assert_eq!(error.severity(), ErrorSeverity::Error);

        let error = CoreError::from(StoreError::BadRequest("bad".to_string()));
        assert_eq!(error.code(), ErrorCode::StoreRejected);
    }

    #[test]
    fn test_unauthorized_message() {
        assert_eq!(CoreError::Unauthorized.to_string(), "Incorrect password");
        assert_eq!(CoreError::Unauthorized.code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn test_validation_details_carry_field() {
        let details = CoreError::validation("amount", "Amount is required").to_details();
        assert_eq!(details.code, ErrorCode::ValidationError);
        assert_eq!(details.message, "Amount is required");
        assert_eq!(details.details, Some(serde_json::json!({ "field": "amount" })));
    }

    #[test]
    fn test_transient_store_error_suggests_retry() {
        let details = CoreError::from(StoreError::Timeout).to_details();
        assert_eq!(details.suggestions.len(), 1);
        assert!(details.to_string().contains("try again"));
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("toggle_paid")
            .with_data("id", serde_json::json!("abc"));

        assert_eq!(context.operation, "toggle_paid");
        assert_eq!(context.data["id"], "abc");
    }
}
