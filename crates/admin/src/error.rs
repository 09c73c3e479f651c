//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ApiError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend admin API call failed.
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Submitted form failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The same action is already being processed.
    #[error("Already in progress: {0}")]
    InFlight(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Api(ApiError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Api(ApiError::Validation(_)) | Self::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Api(_) => StatusCode::BAD_GATEWAY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InFlight(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show an operator; details stay in the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            Self::NotFound(_) => "The requested record does not exist.".to_string(),
            Self::BadRequest(_) => "The request could not be understood.".to_string(),
            Self::Validation(message) => message.clone(),
            Self::InFlight(_) => "That action is still being processed.".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Admin request rejected");
        }

        (status, self.user_message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("booking 123".to_string());
        assert_eq!(err.to_string(), "Not found: booking 123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_user_message_hides_details() {
        let err = AppError::BadRequest("unknown booking status: archived".to_string());
        assert!(!err.user_message().contains("archived"));

        let err = AppError::NotFound("booking 123".to_string());
        assert_eq!(err.user_message(), "The requested record does not exist.");

        let err = AppError::Internal("pool exhausted".to_string());
        assert_eq!(err.user_message(), "Internal server error");

        let err = AppError::Api(ApiError::Validation("Title is required".to_string()));
        assert_eq!(err.user_message(), "Title is required");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Api(ApiError::NotFound("admin/users/4".to_string()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Api(ApiError::Unauthorized)),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            get_status(AppError::Api(ApiError::Validation("bad".to_string()))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::InFlight("bookings:1:status".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
