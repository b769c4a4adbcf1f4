//! Password hashing and verification.

use anyhow::Result;
use tracing::warn;

use crate::types::PasswordDigest;

/// Bcrypt cost factor applied to every new digest.
///
/// Stored digests embed the cost they were created with, so verification
/// keeps working if this is ever raised.
pub const HASH_COST: u32 = 10;

/// Hash a plaintext password with a fresh random salt.
///
/// Two calls with the same input produce different digests; both verify.
pub fn hash_password(password: &str) -> Result<PasswordDigest> {
    let digest = bcrypt::hash(password, HASH_COST)?;
    Ok(PasswordDigest::new(digest))
}

/// Check a plaintext password against a stored digest.
///
/// Fails closed: a digest that cannot be parsed counts as a mismatch
/// rather than an error, so a corrupted record can never authenticate.
pub fn verify_password(password: &str, digest: &PasswordDigest) -> bool {
    match bcrypt::verify(password, digest.as_str()) {
        Ok(verified) => verified,
        Err(e) => {
            warn!(error = %e, "bcrypt verification error");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password() {
        let digest = hash_password("test_password_123").unwrap();

        // Bcrypt digest with the fixed cost factor
        assert!(digest.as_str().starts_with("$2b$10$"));
    }

    #[test]
    fn test_verify_password() {
        let digest = hash_password("test_password_123").unwrap();

        assert!(verify_password("test_password_123", &digest));
        assert!(!verify_password("wrong_password", &digest));
    }

    #[test]
    fn test_hash_uniqueness() {
        let digest1 = hash_password("same_password").unwrap();
        let digest2 = hash_password("same_password").unwrap();

        // Each digest is unique due to the random salt
        assert_ne!(digest1, digest2);

        // Both verify correctly
        assert!(verify_password("same_password", &digest1));
        assert!(verify_password("same_password", &digest2));
    }

    #[test]
    fn test_malformed_digest_fails_closed() {
        let garbage = PasswordDigest::new("not-a-bcrypt-digest");
        assert!(!verify_password("anything", &garbage));

        let empty = PasswordDigest::new("");
        assert!(!verify_password("anything", &empty));
    }

    #[test]
    fn test_empty_password() {
        let digest = hash_password("").unwrap();
        assert!(verify_password("", &digest));
        assert!(!verify_password("notempty", &digest));
    }

    #[test]
    fn test_unicode_password() {
        let password = "p@ssw\u{00f6}rd\u{1f512}";
        let digest = hash_password(password).unwrap();
        assert!(verify_password(password, &digest));
        assert!(!verify_password("password", &digest));
    }
}
