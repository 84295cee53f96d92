//! PIN Service
//!
//! Argon2id hashing for account PINs with configurable parameters and
//! constant-time verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::config::PinConfig;
use crate::error::{AuthError, AuthResult};

/// PIN service for hashing and verification
#[derive(Clone)]
pub struct PinService {
    config: PinConfig,
}

impl PinService {
    /// Create a new PIN service
    pub fn new(config: PinConfig) -> Self {
        Self { config }
    }

    /// Hash a PIN using Argon2id
    pub fn hash_pin(&self, pin: &str) -> AuthResult<String> {
        self.validate_pin_format(pin)?;

        let salt = SaltString::generate(&mut OsRng);

        let params = Params::new(
            self.config.memory_cost,
            self.config.time_cost,
            self.config.parallelism,
            Some(self.config.hash_length as usize),
        )
        .map_err(|e| AuthError::Internal(format!("Invalid Argon2 params: {}", e)))?;

        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

        let hash = argon2
            .hash_password(pin.as_bytes(), &salt)
            .map_err(|_| AuthError::HashingFailed)?;

        Ok(hash.to_string())
    }

    /// Verify a PIN against a stored hash
    pub fn verify_pin(&self, pin: &str, hash: &str) -> AuthResult<bool> {
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::VerificationFailed)?;

        // Parameters come from the stored hash, so old hashes stay
        // verifiable after a config change.
        let argon2 = Argon2::default();
        match argon2.verify_password(pin.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(AuthError::VerificationFailed),
        }
    }

    /// Validate the PIN format: 4 to 6 ASCII digits
    pub fn validate_pin_format(&self, pin: &str) -> AuthResult<()> {
        let len_ok = (4..=6).contains(&pin.len());
        if len_ok && pin.chars().all(|c| c.is_ascii_digit()) {
            Ok(())
        } else {
            Err(AuthError::InvalidPinFormat)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PinConfig {
        PinConfig {
            // Low cost so the test suite stays fast
            memory_cost: 4096,
            time_cost: 1,
            parallelism: 1,
            hash_length: 32,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let service = PinService::new(test_config());
        let pin = "48291";

        let hash = service.hash_pin(pin).unwrap();
        assert!(hash.starts_with("$argon2id$"));

        assert!(service.verify_pin(pin, &hash).unwrap());
        assert!(!service.verify_pin("00000", &hash).unwrap());
    }

    #[test]
    fn test_pin_format() {
        let service = PinService::new(test_config());

        assert!(service.validate_pin_format("1234").is_ok());
        assert!(service.validate_pin_format("123456").is_ok());

        assert!(service.validate_pin_format("123").is_err());
        assert!(service.validate_pin_format("1234567").is_err());
        assert!(service.validate_pin_format("12a4").is_err());
        assert!(service.validate_pin_format("").is_err());
    }

    #[test]
    fn test_bad_format_never_hashed() {
        let service = PinService::new(test_config());
        assert!(matches!(
            service.hash_pin("abc"),
            Err(AuthError::InvalidPinFormat)
        ));
    }

    #[test]
    fn test_different_pins_different_hashes() {
        let service = PinService::new(test_config());
        let pin = "48291";

        let hash1 = service.hash_pin(pin).unwrap();
        let hash2 = service.hash_pin(pin).unwrap();

        // Different salts
        assert_ne!(hash1, hash2);
        assert!(service.verify_pin(pin, &hash1).unwrap());
        assert!(service.verify_pin(pin, &hash2).unwrap());
    }
}
