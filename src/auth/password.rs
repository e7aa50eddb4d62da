// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing with argon2id.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};

/// Argon2 PHC string for a user's password.
///
/// The digest can be stored and verified against, but never displayed:
/// `Debug` is redacted and the type has no `Display`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest loaded from storage.
    pub fn from_stored(phc: String) -> Self {
        Self(phc)
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// Hashing failure.
#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordError(String);

/// Hash a password using argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<PasswordDigest, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError(e.to_string()))?;
    Ok(PasswordDigest(hash.to_string()))
}

/// Verify a password against a stored digest.
///
/// A digest that cannot be parsed is a storage fault, reported as an error
/// rather than a mismatch.
pub fn verify_password(password: &str, digest: &PasswordDigest) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(&digest.0).map_err(|e| PasswordError(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_correct_password() {
        let digest = hash_password("nerdy").unwrap();
        assert!(verify_password("nerdy", &digest).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let digest = hash_password("nerdy").unwrap();
        assert!(!verify_password("geeky", &digest).unwrap());
    }

    #[test]
    fn same_password_gets_different_salts() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn digest_never_contains_plaintext_and_debug_is_redacted() {
        let digest = hash_password("plaintext-secret").unwrap();
        assert!(!digest.0.contains("plaintext-secret"));
        assert_eq!(format!("{digest:?}"), "PasswordDigest(<redacted>)");
    }

    #[test]
    fn unparsable_digest_is_an_error() {
        let digest = PasswordDigest::from_stored("not-a-phc-string".into());
        assert!(verify_password("x", &digest).is_err());
    }
}
