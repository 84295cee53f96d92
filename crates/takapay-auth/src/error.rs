//! Authentication error types
//!
//! Errors carry their own HTTP status codes so the API layer and the session
//! gate map them the same way: a missing token is 401, a token that fails
//! verification is 403.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer token on a protected route
    #[error("Authentication required")]
    MissingToken,

    /// Token is malformed, has a bad signature or a wrong issuer
    #[error("Invalid token")]
    InvalidToken,

    /// PIN does not match the stored hash
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// PIN fails the format rule (4-6 ASCII digits)
    #[error("PIN must be 4 to 6 digits")]
    InvalidPinFormat,

    /// Hashing could not run with the configured parameters
    #[error("PIN hashing failed")]
    HashingFailed,

    /// Stored hash could not be parsed
    #[error("PIN verification failed")]
    VerificationFailed,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (not exposed to clients)
    #[error("Internal error")]
    Internal(String),
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidPinFormat | Self::InvalidCredentials => 400,
            Self::MissingToken => 401,
            Self::InvalidToken => 403,
            Self::HashingFailed
            | Self::VerificationFailed
            | Self::Config(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Machine-readable code, safe to expose
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingToken => "UNAUTHENTICATED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidPinFormat => "INVALID_PIN_FORMAT",
            Self::HashingFailed | Self::VerificationFailed | Self::Config(_) | Self::Internal(_) => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Safe message for the client
    pub fn client_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Internal(_) => "An internal error occurred".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Error response body for API clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<&AuthError> for ErrorResponse {
    fn from(error: &AuthError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.client_message(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        Self::InvalidToken
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(_: argon2::password_hash::Error) -> Self {
        Self::VerificationFailed
    }
}
