//! Password hashing.
//!
//! bcrypt with a configurable cost factor; the plaintext is hashed before it
//! ever reaches the storage layer and is never logged.

use crate::error::ApiError;

pub fn hash_password(plain: &str, cost: u32) -> Result<String, ApiError> {
    bcrypt::hash(plain, cost).map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        ApiError::internal_server_error("Failed to process credentials")
    })
}

/// Compare a candidate password against a stored hash. bcrypt's verify is
/// timing-safe on the digest comparison.
pub fn verify_password(plain: &str, hashed: &str) -> Result<bool, ApiError> {
    bcrypt::verify(plain, hashed).map_err(|e| {
        tracing::error!("Password verification failed: {}", e);
        ApiError::internal_server_error("Failed to process credentials")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        // minimum cost keeps the test fast
        let hash = hash_password("Abcdefg1!", 4).unwrap();
        assert_ne!(hash, "Abcdefg1!");
        assert!(verify_password("Abcdefg1!", &hash).unwrap());
        assert!(!verify_password("Wrongpass1!", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("Abcdefg1!", 4).unwrap();
        let b = hash_password("Abcdefg1!", 4).unwrap();
        assert_ne!(a, b);
    }
}
