//! Password hashing with bcrypt.
//!
//! Digests are salted, so hashing the same plaintext twice yields different
//! strings; verification reads the salt and cost back out of the digest and
//! compares in constant time. Hashing is CPU-bound, so the async wrappers run
//! it on the blocking pool instead of a request-serving thread.

use thiserror::Error;
use tokio::task::JoinError;

/// bcrypt ignores input past 72 bytes; reject instead of silently truncating.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("password exceeds {MAX_PASSWORD_BYTES} bytes")]
    TooLong,

    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] JoinError),
}

fn hash_blocking(plaintext: &str) -> Result<String, HashError> {
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(HashError::TooLong);
    }

    Ok(bcrypt::hash(plaintext, bcrypt::DEFAULT_COST)?)
}

fn verify_blocking(digest: &str, plaintext: &str) -> Result<bool, HashError> {
    if plaintext.len() > MAX_PASSWORD_BYTES {
        return Err(HashError::TooLong);
    }

    // A mismatch is Ok(false); only a malformed digest is an error.
    Ok(bcrypt::verify(plaintext, digest)?)
}

/// Hash a plaintext password into a salted bcrypt digest.
pub async fn hash(plaintext: &str) -> Result<String, HashError> {
    let plaintext = plaintext.to_owned();
    tokio::task::spawn_blocking(move || hash_blocking(&plaintext)).await?
}

/// Check a plaintext password against a stored digest.
pub async fn verify(digest: &str, plaintext: &str) -> Result<bool, HashError> {
    let digest = digest.to_owned();
    let plaintext = plaintext.to_owned();
    tokio::task::spawn_blocking(move || verify_blocking(&digest, &plaintext)).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_round_trip() -> Result<(), HashError> {
        let digest = hash("secretpw").await?;
        assert!(digest.starts_with("$2"));
        assert!(verify(&digest, "secretpw").await?);
        assert!(!verify(&digest, "secretpx").await?);
        Ok(())
    }

    #[tokio::test]
    async fn hashing_is_salted() -> Result<(), HashError> {
        let first = hash("same password").await?;
        let second = hash("same password").await?;
        assert_ne!(first, second);
        assert!(verify(&first, "same password").await?);
        assert!(verify(&second, "same password").await?);
        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_false_not_error() -> Result<(), HashError> {
        let digest = hash("correct horse").await?;
        for wrong in ["correct horsf", "CORRECT HORSE", ""] {
            assert!(!verify(&digest, wrong).await?);
        }
        Ok(())
    }

    #[tokio::test]
    async fn over_long_password_is_rejected() {
        let long = "x".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(matches!(hash(&long).await, Err(HashError::TooLong)));
    }

    #[tokio::test]
    async fn malformed_digest_is_an_error() {
        assert!(matches!(
            verify("not a bcrypt digest", "whatever!").await,
            Err(HashError::Bcrypt(_))
        ));
    }
}
