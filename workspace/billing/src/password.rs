//! Password hashing.

use argon2::Argon2;
use password_hash::rand_core::OsRng;
use password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::error::Result;

/// Hash a plain password with argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against an argon2id hash.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_verifiable() {
        let first = hash_password("password123").unwrap();
        let second = hash_password("password123").unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert!(!first.contains("password123"));
        assert_ne!(first, second);
        assert!(verify_password("password123", &first));
        assert!(verify_password("password123", &second));
        assert!(!verify_password("password124", &first));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_password("password123", "not-a-phc-string"));
    }
}
