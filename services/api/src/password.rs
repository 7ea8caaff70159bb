//! Password hashing and verification
//!
//! Both operations use the same salted, adaptive-cost function (Argon2 with
//! default parameters), and both run on the blocking thread pool so the
//! CPU-bound work never stalls the request-accepting tasks.

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

/// Hash a plaintext password with a freshly generated salt
pub async fn hash(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    })
    .await?
}

/// Verify a plaintext password against a stored hash
pub async fn verify(password: String, password_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&password_hash)
            .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

        let argon2 = Argon2::default();
        Ok(argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    })
    .await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify_round_trip() {
        let hashed = hash("correct horse battery staple".to_string())
            .await
            .unwrap();

        assert_ne!(hashed, "correct horse battery staple");
        assert!(hashed.starts_with("$argon2"));

        let valid = verify("correct horse battery staple".to_string(), hashed)
            .await
            .unwrap();
        assert!(valid);
    }

    #[tokio::test]
    async fn test_wrong_password_fails_verification() {
        let hashed = hash("correct horse battery staple".to_string())
            .await
            .unwrap();

        let valid = verify("wrong password".to_string(), hashed).await.unwrap();
        assert!(!valid);
    }

    #[tokio::test]
    async fn test_same_password_hashes_differently() {
        let first = hash("password123".to_string()).await.unwrap();
        let second = hash("password123".to_string()).await.unwrap();

        // Random salts make every hash unique
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_verify_rejects_malformed_hash() {
        let result = verify("password123".to_string(), "not-a-phc-string".to_string()).await;
        assert!(result.is_err());
    }
}
