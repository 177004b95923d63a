//! Error types for cafe-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cafe_core::{CoreError, ErrorCode, ErrorDetails};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to delete transaction")]
    DeleteFailed,
}

impl ApiError {
    /// Error code carried in the response body
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::Core(e) => e.code(),
            ApiError::DeleteFailed => ErrorCode::StoreRejected,
        }
    }

    /// HTTP status for the error code
    pub fn status(&self) -> StatusCode {
        match self.code() {
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InvalidFilter => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::FORBIDDEN,
            ErrorCode::TransactionNotFound => StatusCode::NOT_FOUND,
            ErrorCode::InvalidState => StatusCode::CONFLICT,
            ErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::StoreRejected => StatusCode::BAD_GATEWAY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        match self {
            ApiError::Core(e) => e.to_details(),
            ApiError::DeleteFailed => ErrorDetails::new(self.code(), self.to_string())
                .with_suggestion("The record is still listed; try again or cancel.".to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        log::debug!("Responding {} [{}] {}", status, self.code(), self);
        (status, Json(self.to_details())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(CoreError::validation("amount", "Amount is required")).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::from(CoreError::Unauthorized).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::DeleteFailed.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_details_message() {
        let details = ApiError::from(CoreError::Unauthorized).to_details();
        assert_eq!(details.code, ErrorCode::Unauthorized);
        assert_eq!(details.message, "Incorrect password");
    }
}
