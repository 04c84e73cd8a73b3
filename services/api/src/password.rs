//! Password hashing and verification
//!
//! Credentials are stored as bcrypt hashes. Every hash embeds a freshly
//! generated salt and the cost factor, so the stored string is
//! self-contained for verification and no separate salt storage exists.

use thiserror::Error;

/// Cost factor applied to every new hash.
const HASH_COST: u32 = 10;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Hashing task failed to complete")]
    TaskFailed,
}

/// Password hasher with a fixed cost factor.
///
/// Hashing is deliberately slow; callers on the async path run it through
/// `tokio::task::spawn_blocking`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password with a fresh salt.
    ///
    /// # Errors
    /// * `HashingFailed` - bcrypt rejected the input (e.g. embedded NUL)
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, HASH_COST).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// A stored value that does not parse as a bcrypt hash verifies to
    /// `false` rather than erroring; `looks_hashed` exists for callers
    /// that want to report that condition separately.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        bcrypt::verify(password, stored).unwrap_or(false)
    }

    /// Whether a stored credential has the shape of a bcrypt hash.
    ///
    /// Diagnostic only (legacy plaintext detection); never a substitute
    /// for `verify`.
    pub fn looks_hashed(&self, stored: &str) -> bool {
        stored.starts_with("$2a$") || stored.starts_with("$2b$") || stored.starts_with("$2y$")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "pw12345";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_embeds_cost_and_salt() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("secret").expect("Failed to hash password");
        let second = hasher.hash("secret").expect("Failed to hash password");

        assert!(first.starts_with("$2"));
        assert!(first.contains("$10$"));
        // fresh salt per call
        assert_ne!(first, second);
        assert!(hasher.verify("secret", &first));
        assert!(hasher.verify("secret", &second));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        let hasher = PasswordHasher::new();

        assert!(!hasher.verify("password", "not-a-hash"));
        assert!(!hasher.verify("password", ""));
        // legacy plaintext row: same value stored as provided
        assert!(!hasher.verify("password", "password"));
    }

    #[test]
    fn test_looks_hashed() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("secret").expect("Failed to hash password");

        assert!(hasher.looks_hashed(&hash));
        assert!(!hasher.looks_hashed("plaintext-password"));
    }
}
