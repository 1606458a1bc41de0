//! # Cryptographic Utilities
//!
//! Password digests and session token generation.
//!
//! New digests are Argon2id PHC strings. Digests written by earlier
//! deployments are bare lowercase-hex SHA-256 and still verify.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::errors::{AuthError, AuthResult};

/// Digest a password for storage using Argon2id
pub fn digest_password(password: &str) -> AuthResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::HashingFailed)
}

/// Check a password against a stored digest.
///
/// Unrecognised digest formats never verify.
pub fn verify_password(password: &str, digest: &str) -> bool {
    if is_legacy_digest(digest) {
        return constant_time_str_eq(&legacy_digest(password), digest);
    }

    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Lowercase hex SHA-256, the digest format of older user files
pub fn legacy_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn is_legacy_digest(digest: &str) -> bool {
    digest.len() == 64 && digest.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Generate a 256-bit random session token, URL-safe base64
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, bytes)
}

/// Hash a token for storage using SHA-256.
///
/// Only the hash is kept server-side; the raw token lives in the cookie.
pub fn hash_token(token: &str) -> String {
    let result = Sha256::digest(token.as_bytes());
    base64::Engine::encode(&base64::engine::general_purpose::URL_SAFE_NO_PAD, result)
}

/// Constant-time comparison of two strings
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_and_verify() {
        let digest = digest_password("s3cret").unwrap();
        assert_ne!(digest, "s3cret");
        assert!(digest.starts_with("$argon2"));
        assert!(verify_password("s3cret", &digest));
        assert!(!verify_password("wrong", &digest));
    }

    #[test]
    fn test_digests_are_salted() {
        let a = digest_password("same").unwrap();
        let b = digest_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn test_legacy_sha256_digest_verifies() {
        // sha256("admin")
        let digest = "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918";
        assert_eq!(legacy_digest("admin"), digest);
        assert!(verify_password("admin", digest));
        assert!(!verify_password("Admin", digest));
    }

    #[test]
    fn test_plaintext_never_verifies() {
        assert!(!verify_password("admin", "admin"));
        assert!(!verify_password("", ""));
    }

    #[test]
    fn test_token_generation() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert_eq!(t1.len(), 43);
        assert_eq!(hash_token(&t1), hash_token(&t1));
        assert_ne!(hash_token(&t1), t1);
    }

    #[test]
    fn test_constant_time_comparison() {
        assert!(constant_time_str_eq("hello", "hello"));
        assert!(!constant_time_str_eq("hello", "world"));
        assert!(!constant_time_str_eq("hello", "hello!"));
    }
}
