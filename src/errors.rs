// ABOUTME: Unified error handling for the Backoffice admin backend
// ABOUTME: Defines domain error codes and the single mapping to HTTP responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

//! # Unified Error Handling
//!
//! Every fallible operation in the crate reports an [`AppError`] carrying an
//! [`ErrorCode`]. The code determines both the HTTP status and the
//! machine-readable string clients receive; the mapping lives here and nowhere
//! else, so the services stay transport-agnostic.
//!
//! Infrastructure failures (database unreachable, token signing failure) are
//! logged with full detail but surface to callers as a generic internal error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (client input defect, no mutation attempted)
    InvalidEmail,
    InvalidPassword,
    InvalidName,
    InvalidRole,
    InvalidStatus,

    // Authentication
    InvalidCredentials,
    Unauthorized,
    InvalidToken,
    ExpiredToken,

    // Resources
    AdminNotFound,
    UserNotFound,
    AdminAlreadyExists,
    UserAlreadyExists,

    // Infrastructure (never shown verbatim to the caller)
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> StatusCode {
        match self {
            Self::InvalidEmail
            | Self::InvalidPassword
            | Self::InvalidName
            | Self::InvalidRole
            | Self::InvalidStatus => StatusCode::BAD_REQUEST,

            Self::InvalidCredentials
            | Self::Unauthorized
            | Self::InvalidToken
            | Self::ExpiredToken => StatusCode::UNAUTHORIZED,

            Self::AdminNotFound | Self::UserNotFound => StatusCode::NOT_FOUND,

            Self::AdminAlreadyExists | Self::UserAlreadyExists => StatusCode::CONFLICT,

            Self::DatabaseError | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code string carried in the error envelope
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidEmail
            | Self::InvalidPassword
            | Self::InvalidName
            | Self::InvalidRole
            | Self::InvalidStatus => "VALIDATION_ERROR",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized | Self::InvalidToken | Self::ExpiredToken => "UNAUTHORIZED",
            Self::AdminNotFound | Self::UserNotFound => "NOT_FOUND",
            Self::AdminAlreadyExists | Self::UserAlreadyExists => "CONFLICT",
            Self::DatabaseError | Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether this code describes an infrastructure failure whose message
    /// must not leak to the caller
    #[must_use]
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::DatabaseError | Self::InternalError)
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code determining status and envelope code string
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_email() -> Self {
        Self::new(ErrorCode::InvalidEmail, "invalid email parameter")
    }

    pub fn invalid_password() -> Self {
        Self::new(ErrorCode::InvalidPassword, "invalid password parameter")
    }

    pub fn invalid_name() -> Self {
        Self::new(ErrorCode::InvalidName, "invalid name parameter")
    }

    pub fn invalid_role() -> Self {
        Self::new(ErrorCode::InvalidRole, "invalid role parameter")
    }

    pub fn invalid_status() -> Self {
        Self::new(ErrorCode::InvalidStatus, "invalid status parameter")
    }

    /// Deliberately ambiguous between unknown email and wrong password
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials, "invalid email or password")
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn invalid_token() -> Self {
        Self::new(ErrorCode::InvalidToken, "invalid token")
    }

    pub fn expired_token() -> Self {
        Self::new(ErrorCode::ExpiredToken, "expired token")
    }

    pub fn admin_not_found() -> Self {
        Self::new(ErrorCode::AdminNotFound, "admin not found")
    }

    pub fn admin_already_exists() -> Self {
        Self::new(ErrorCode::AdminAlreadyExists, "admin already exists")
    }

    pub fn user_not_found() -> Self {
        Self::new(ErrorCode::UserNotFound, "user not found")
    }

    pub fn user_already_exists() -> Self {
        Self::new(ErrorCode::UserAlreadyExists, "user already exists")
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::database(error.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// HTTP error envelope: `{"success": false, "error": {"code", "message"}}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorResponseDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    pub code: String,
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        // Internal messages are for logs, not clients
        let message = if error.code.is_internal() {
            "internal server error".to_string()
        } else {
            error.message.clone()
        };
        Self {
            success: false,
            error: ErrorResponseDetails {
                code: error.code.as_str().to_string(),
                message,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.code.is_internal() {
            tracing::error!("internal error: {}", self.message);
        }
        let status = self.code.http_status();
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_http_status() {
        assert_eq!(
            ErrorCode::InvalidEmail.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::ExpiredToken.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::AdminNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ErrorCode::AdminAlreadyExists.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_never_leaks() {
        let error = AppError::database("connection refused on 10.0.0.3:5432");
        let response = ErrorResponse::from(&error);
        assert_eq!(response.error.code, "INTERNAL_ERROR");
        assert_eq!(response.error.message, "internal server error");
    }

    #[test]
    fn test_validation_message_passes_through() {
        let error = AppError::invalid_email();
        let response = ErrorResponse::from(&error);
        assert_eq!(response.error.code, "VALIDATION_ERROR");
        assert_eq!(response.error.message, "invalid email parameter");
        assert!(!response.success);
    }

    #[test]
    fn test_credentials_error_is_ambiguous() {
        let error = AppError::invalid_credentials();
        let response = ErrorResponse::from(&error);
        assert_eq!(response.error.message, "invalid email or password");
    }
}
