//! API error handling
//!
//! One taxonomy for the whole HTTP surface. The login path deliberately
//! reports lookup misses and PIN mismatches with 400 rather than 401; 401 is
//! reserved for protected routes called without a token, and 403 for blocked
//! accounts and tokens that fail verification.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error taxonomy
#[derive(Debug, Error)]
pub enum ApiError {
    /// Mobile, email or NID already registered
    #[error("User already exists")]
    DuplicateIdentity,

    /// Login identifier matched no account
    #[error("Account not found")]
    AccountNotFound,

    /// Login identifier is neither an email nor an 11-digit mobile number
    #[error("Identifier must be an email address or an 11-digit mobile number")]
    BadFormat,

    /// PIN did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account is blocked
    #[error("Account is blocked")]
    Blocked,

    /// Lifecycle transition target is absent or not in the required state
    #[error("Not eligible: {0}")]
    NotEligible(String),

    /// Path id is not a syntactically valid account id
    #[error("Invalid account id")]
    BadId,

    /// No token on a protected route
    #[error("Authentication required")]
    Unauthorized,

    /// Token present but failed verification
    #[error("Forbidden")]
    Forbidden,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage failure
    #[error("Storage error")]
    Storage,

    /// Internal error
    #[error("Internal error")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DuplicateIdentity
            | Self::AccountNotFound
            | Self::BadFormat
            | Self::InvalidCredentials
            | Self::BadId
            | Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::Unauthorized => StatusCode::UNAUTHORIZED,

            Self::Blocked | Self::Forbidden => StatusCode::FORBIDDEN,

            Self::NotFound(_) | Self::NotEligible(_) => StatusCode::NOT_FOUND,

            Self::Storage | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code, safe to expose
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateIdentity => "DUPLICATE_IDENTITY",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::BadFormat => "BAD_FORMAT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Blocked => "ACCOUNT_BLOCKED",
            Self::NotEligible(_) => "NOT_ELIGIBLE",
            Self::BadId => "BAD_ID",
            Self::Unauthorized => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Safe message for the client
    pub fn client_message(&self) -> String {
        match self {
            Self::Storage => "An internal error occurred".to_string(),
            Self::Internal(_) => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

/// API error response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.error_code().to_string(),
            message: err.client_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::from(&self);
        (status, Json(body)).into_response()
    }
}

impl From<takapay_db::DbError> for ApiError {
    fn from(err: takapay_db::DbError) -> Self {
        use takapay_db::DbError;
        match err {
            DbError::Duplicate(_) => Self::DuplicateIdentity,
            DbError::NotFound(msg) => Self::NotFound(msg),
            DbError::InvalidInput(msg) => Self::Validation(msg),
            other => {
                tracing::error!(error = ?other, "Storage error");
                Self::Storage
            }
        }
    }
}

impl From<takapay_auth::AuthError> for ApiError {
    fn from(err: takapay_auth::AuthError) -> Self {
        use takapay_auth::AuthError;
        match err {
            AuthError::MissingToken => Self::Unauthorized,
            AuthError::InvalidToken => Self::Forbidden,
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::InvalidPinFormat => Self::Validation(err.to_string()),
            other => {
                tracing::error!(error = ?other, "Auth error");
                Self::Internal(other.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map(|m| m.as_ref()).unwrap_or("invalid")
                    )
                })
            })
            .collect();
        Self::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::DuplicateIdentity.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::AccountNotFound.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidCredentials.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Blocked.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::NotEligible("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Storage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_db_duplicate_maps_to_duplicate_identity() {
        let err = ApiError::from(takapay_db::DbError::Duplicate("mobile".to_string()));
        assert!(matches!(err, ApiError::DuplicateIdentity));
    }

    #[test]
    fn test_storage_error_message_is_opaque() {
        let err = ApiError::from(takapay_db::DbError::Connection("secret dsn".to_string()));
        assert!(!ErrorResponse::from(&err).message.contains("secret"));
    }
}
