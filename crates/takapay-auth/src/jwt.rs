//! Bearer Token Service
//!
//! HS256 tokens carrying the account id and role. Tokens have no expiry
//! claim; invalidation happens by rotating the signing secret.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AuthError, AuthResult};
use crate::types::{AuthSession, TokenClaims};
use takapay_types::AccountType;

/// Token service for issuing and verifying bearer tokens
#[derive(Clone)]
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a new token service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a token for an account
    pub fn issue(&self, account_id: Uuid, role: AccountType) -> AuthResult<String> {
        let claims = TokenClaims {
            sub: account_id.to_string(),
            role,
            iat: Utc::now().timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to encode token: {}", e)))
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> AuthResult<TokenClaims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        // Tokens carry no exp claim, so expiry must not be required here.
        validation.validate_exp = false;
        validation.set_required_spec_claims::<&str>(&[]);

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Verify a token and resolve it to a session identity
    pub fn verify_session(&self, token: &str) -> AuthResult<AuthSession> {
        let claims = self.verify(token)?;
        let account_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;

        Ok(AuthSession {
            account_id,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-for-jwt-tokens-min-32-bytes!".to_string(),
            issuer: "test-issuer".to_string(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let service = TokenService::new(test_config());
        let account_id = Uuid::new_v4();

        let token = service.issue(account_id, AccountType::User).unwrap();
        assert!(!token.is_empty());

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.role, AccountType::User);
        assert_eq!(claims.iss, "test-issuer");
    }

    #[test]
    fn test_verify_session() {
        let service = TokenService::new(test_config());
        let account_id = Uuid::new_v4();

        let token = service.issue(account_id, AccountType::Agent).unwrap();
        let session = service.verify_session(&token).unwrap();

        assert_eq!(session.account_id, account_id);
        assert_eq!(session.role, AccountType::Agent);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = TokenService::new(test_config());
        let token = service.issue(Uuid::new_v4(), AccountType::User).unwrap();

        let other = TokenService::new(JwtConfig {
            secret: "a-completely-different-secret-of-32-bytes!!".to_string(),
            issuer: "test-issuer".to_string(),
        });
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let issuing = TokenService::new(JwtConfig {
            issuer: "someone-else".to_string(),
            ..test_config()
        });
        let token = issuing.issue(Uuid::new_v4(), AccountType::User).unwrap();

        let verifying = TokenService::new(test_config());
        assert!(matches!(
            verifying.verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = TokenService::new(test_config());
        assert!(service.verify("not-a-token").is_err());
    }
}
