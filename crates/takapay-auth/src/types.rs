//! Shared authentication types

use serde::{Deserialize, Serialize};
use takapay_types::AccountType;
use uuid::Uuid;

/// Claims carried in a bearer token.
///
/// There is deliberately no `exp` claim: sessions do not expire, a token
/// stays valid until the signing secret rotates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account id
    pub sub: String,
    /// Role at issue time
    pub role: AccountType,
    /// Issued-at timestamp
    pub iat: i64,
    /// Issuer
    pub iss: String,
}

/// Verified caller identity attached to request extensions by the
/// session gate.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub account_id: Uuid,
    pub role: AccountType,
}
