//! Password hashing value object.
//!
//! Plaintext passwords exist only transiently; accounts store a PHC-encoded
//! Argon2id hash. Verification never compares plaintext and parsing rejects
//! strings that are not valid PHC encodings, so a raw password can never be
//! stored where a hash belongs.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as PhcHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

/// PHC-encoded Argon2id password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

/// Errors raised while hashing or parsing password hashes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The Argon2 hasher failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
    /// The stored string is not a valid PHC encoding.
    #[error("invalid password hash encoding")]
    InvalidEncoding,
}

impl PasswordHash {
    /// Hash a plaintext password with a fresh random salt.
    pub fn from_plain(plain: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hashed = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::Hashing(err.to_string()))?;
        Ok(Self(hashed.to_string()))
    }

    /// Wrap an already-encoded hash, validating the PHC shape.
    pub fn from_hash(encoded: impl Into<String>) -> Result<Self, PasswordHashError> {
        let encoded = encoded.into();
        PhcHash::new(&encoded).map_err(|_| PasswordHashError::InvalidEncoding)?;
        Ok(Self(encoded))
    }

    /// Whether `plain` matches this hash.
    ///
    /// An undecodable stored hash counts as a mismatch rather than an error
    /// so login failures stay indistinguishable to the caller.
    pub fn verify(&self, plain: &str) -> bool {
        PhcHash::new(&self.0)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// PHC-encoded representation for persistence.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PasswordHash {
    /// Redacted rendering; the encoding never appears in logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted password hash>")
    }
}
