//! TakaPay Authentication Layer
//!
//! Authentication for the TakaPay platform:
//!
//! - **Bearer tokens**: HS256 tokens carrying the account id and role, with
//!   no expiry claim (sessions last until the secret rotates)
//! - **PIN security**: Argon2id hashing (OWASP recommended) with
//!   constant-time verification
//! - **Session gate**: tower middleware that rejects bad tokens with 403 and
//!   leaves tokenless requests to the `RequireAuth` extractor (401)

pub mod config;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod pin;
pub mod types;

pub use config::{AuthConfig, JwtConfig, PinConfig};
pub use error::{AuthError, AuthResult, ErrorResponse};
pub use jwt::TokenService;
pub use middleware::{AuthLayer, AuthMiddleware, RequireAuth};
pub use pin::PinService;
pub use types::{AuthSession, TokenClaims};

use std::sync::Arc;

/// Main authentication service combining tokens and PIN hashing
#[derive(Clone)]
pub struct AuthService {
    pub tokens: TokenService,
    pub pins: PinService,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(config: AuthConfig) -> Self {
        let tokens = TokenService::new(config.jwt.clone());
        let pins = PinService::new(config.pin.clone());

        Self { tokens, pins }
    }

    /// Create a session gate layer for an Axum router
    pub fn layer(&self) -> AuthLayer {
        AuthLayer::new(Arc::new(self.tokens.clone()))
    }
}
