//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::AccountDto;

// =============================================================================
// Registration
// =============================================================================

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    /// Mobile number (11 digits)
    #[validate(length(equal = 11, message = "Mobile number must be 11 digits"))]
    pub mobile: String,
    /// Email address
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// National ID
    #[validate(length(min = 1, message = "NID must not be empty"))]
    pub nid: String,
    /// Secret PIN (4-6 digits)
    #[validate(length(min = 4, max = 6, message = "PIN must be 4 to 6 digits"))]
    pub pin: String,
    /// Requested role: user, agent or pending
    pub account_type: String,
}

/// Plain message response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Outcome message
    pub message: String,
}

// =============================================================================
// Login
// =============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address or 11-digit mobile number
    pub identifier: String,
    /// Secret PIN
    pub pin: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token
    pub token: String,
    /// The authenticated account, without credential material
    pub user: AccountDto,
    /// Outcome message
    pub message: String,
}

/// Decoded session returned by GET /user
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Account id from the token
    pub account_id: String,
    /// Role as of token issuance
    pub role: String,
}
