//! Password hashing utilities

use bcrypt::{hash, verify};

/// Hash a password using bcrypt with the given cost factor
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "secure_password_123";
        let hashed = hash_password(password, 4).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same", 4).unwrap();
        let b = hash_password("same", 4).unwrap();
        assert_ne!(a, b);
    }
}
