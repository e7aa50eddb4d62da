// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login.
//!
//! Plaintext passwords exist only for the duration of a `register` or
//! `authenticate` call; only the argon2 digest is stored.

use std::sync::LazyLock;

use regex::Regex;

use super::password::{hash_password, verify_password, PasswordError};
use super::token::{TokenError, TokenService};
use crate::error::ApiError;
use crate::storage::{Database, StorageError, StoredUser, UserRepository};

/// Structural email check: one `@`, a dotted domain, no spaces.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$").expect("valid email regex")
});

const EMPTY_CREDENTIALS: &str = "The username or password cannot be empty";

/// Registration or login failure.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid username or password. Please try again.")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(StorageError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<StorageError> for CredentialError {
    fn from(err: StorageError) -> Self {
        match err {
            // Lost a registration race: the unique index rejected the insert.
            StorageError::AlreadyExists(_) => {
                CredentialError::Conflict("User already exists. Please login".to_string())
            }
            other => CredentialError::Storage(other),
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Validation(msg) => ApiError::validation(msg),
            CredentialError::Conflict(msg) => ApiError::conflict(msg),
            CredentialError::InvalidCredentials => ApiError::unauthorized(err.to_string()),
            CredentialError::Storage(e) => ApiError::from(e),
            CredentialError::Password(e) => ApiError::internal(e),
            CredentialError::Token(e) => ApiError::internal(e),
        }
    }
}

/// Check an email against the structural pattern.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// User identity and password records, plus token issuance on login.
pub struct CredentialStore<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenService,
}

impl<'a> CredentialStore<'a> {
    pub fn new(db: &'a Database, tokens: &'a TokenService) -> Self {
        Self {
            users: UserRepository::new(db),
            tokens,
        }
    }

    /// Register a new user.
    ///
    /// # Errors
    /// - `Validation` for a blank username or password, or a malformed email
    /// - `Conflict` if the username or email is already registered
    pub fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<StoredUser, CredentialError> {
        let username = username.trim();
        let email = email.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(CredentialError::Validation(EMPTY_CREDENTIALS.to_string()));
        }

        if self.users.find_by_username(username)?.is_some() {
            return Err(CredentialError::Conflict(
                "User already exists. Please login".to_string(),
            ));
        }

        if !is_valid_email(email) {
            return Err(CredentialError::Validation(
                "Cannot register with invalid email.".to_string(),
            ));
        }

        let digest = hash_password(password)?;
        match self.users.create(username, email, digest) {
            Ok(user) => Ok(user),
            Err(StorageError::AlreadyExists(what)) if what.starts_with("Email") => Err(
                CredentialError::Conflict("Email is already registered".to_string()),
            ),
            Err(e) => Err(e.into()),
        }
    }

    /// Check a username and password and issue an access token.
    ///
    /// # Errors
    /// - `Validation` for a blank username or password
    /// - `InvalidCredentials` if no such user exists or the password is wrong
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, CredentialError> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(CredentialError::Validation(EMPTY_CREDENTIALS.to_string()));
        }

        let user = self
            .users
            .find_by_username(username)?
            .ok_or(CredentialError::InvalidCredentials)?;

        if !verify_password(password, &user.password_digest)? {
            return Err(CredentialError::InvalidCredentials);
        }

        Ok(self.tokens.issue(user.id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::temp_db;

    fn tokens() -> TokenService {
        TokenService::new(b"credential-test-secret")
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("nerd@tests.com"));
        assert!(is_valid_email("first.last+tag@sub-domain.co.uk"));
        assert!(!is_valid_email("nerd"));
        assert!(!is_valid_email("nerd@tests"));
        assert!(!is_valid_email("nerd@@tests.com"));
        assert!(!is_valid_email("ne rd@tests.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn register_then_authenticate_resolves_to_user() {
        let (db, _dir) = temp_db();
        let tokens = tokens();
        let store = CredentialStore::new(&db, &tokens);

        let user = store.register("nerd", "nerdy", "nerd@tests.com").unwrap();
        let token = store.authenticate("nerd", "nerdy").unwrap();

        assert_eq!(tokens.verify(&token).unwrap().user_id, user.id);
    }

    #[test]
    fn register_rejects_blank_fields() {
        let (db, _dir) = temp_db();
        let tokens = tokens();
        let store = CredentialStore::new(&db, &tokens);

        for (u, p) in [("", "pw"), ("  ", "pw"), ("nerd", ""), ("nerd", "   ")] {
            let result = store.register(u, p, "nerd@tests.com");
            assert!(matches!(result, Err(CredentialError::Validation(_))));
        }
    }

    #[test]
    fn register_rejects_invalid_email() {
        let (db, _dir) = temp_db();
        let tokens = tokens();
        let store = CredentialStore::new(&db, &tokens);

        let result = store.register("nerd", "nerdy", "not-an-email");
        assert!(matches!(result, Err(CredentialError::Validation(_))));
    }

    #[test]
    fn register_rejects_duplicate_username_and_email() {
        let (db, _dir) = temp_db();
        let tokens = tokens();
        let store = CredentialStore::new(&db, &tokens);

        store.register("nerd", "nerdy", "nerd@tests.com").unwrap();

        assert!(matches!(
            store.register("nerd", "other", "other@tests.com"),
            Err(CredentialError::Conflict(_))
        ));
        assert!(matches!(
            store.register("geek", "other", "nerd@tests.com"),
            Err(CredentialError::Conflict(_))
        ));
    }

    #[test]
    fn stored_digest_is_not_the_password() {
        let (db, _dir) = temp_db();
        let tokens = tokens();
        let store = CredentialStore::new(&db, &tokens);

        let user = store.register("nerd", "nerdy", "nerd@tests.com").unwrap();
        let stored = serde_json::to_string(&user).unwrap();
        assert!(!stored.contains("\"nerdy\""));
    }

    #[test]
    fn authenticate_rejects_wrong_password_and_unknown_user() {
        let (db, _dir) = temp_db();
        let tokens = tokens();
        let store = CredentialStore::new(&db, &tokens);
        store.register("nerd", "nerdy", "nerd@tests.com").unwrap();

        assert!(matches!(
            store.authenticate("nerd", "wrong"),
            Err(CredentialError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("ghost", "nerdy"),
            Err(CredentialError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("", "nerdy"),
            Err(CredentialError::Validation(_))
        ));
    }

    #[test]
    fn credential_errors_map_to_api_kinds() {
        use crate::error::ErrorKind;

        let api: ApiError = CredentialError::InvalidCredentials.into();
        assert_eq!(api.kind, ErrorKind::Unauthorized);

        let api: ApiError = CredentialError::from(StorageError::AlreadyExists("User x".into())).into();
        assert_eq!(api.kind, ErrorKind::Conflict);
    }
}
