//! Password hashing using argon2
//!
//! Provides secure password hashing and verification.
//!
//! # Performance Considerations
//!
//! Argon2 is intentionally CPU-intensive. Request handlers use the `_async`
//! variants, which run on the blocking thread pool.

use anyhow::Result;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use tracing::warn;

/// Hash checked when there is no stored hash to compare against, so a
/// missing user costs the same argon2 work as a wrong password.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| PasswordService::hash("dummy-password-for-timing-equalization").ok());

/// Password hashing service
///
/// Uses Argon2id. Verification recomputes the hash and compares the outputs
/// in constant time.
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using argon2 (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a hash (blocking operation)
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))?;
        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Check a presented password against a stored hash
    ///
    /// Never errors: an absent or empty value on either side, or a stored
    /// hash that cannot be parsed, is simply not authenticated. A presented
    /// password without a stored hash is still run through argon2.
    pub fn is_authenticated(password: Option<&str>, hash: Option<&str>) -> bool {
        let Some(password) = password.filter(|p| !p.is_empty()) else {
            return false;
        };
        let Some(hash) = hash.filter(|h| !h.is_empty()) else {
            if let Some(dummy) = DUMMY_HASH.as_deref() {
                let _ = Self::verify(password, dummy);
            }
            return false;
        };

        match Self::verify(password, hash) {
            Ok(matched) => matched,
            Err(e) => {
                warn!(error = %e, "Stored password hash is unusable");
                false
            }
        }
    }

    /// `is_authenticated` on the blocking thread pool
    pub async fn is_authenticated_async(password: Option<String>, hash: Option<String>) -> bool {
        tokio::task::spawn_blocking(move || {
            Self::is_authenticated(password.as_deref(), hash.as_deref())
        })
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Password verification task failed");
            false
        })
    }
}
