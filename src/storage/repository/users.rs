// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository.
//!
//! Usernames and emails are unique. Both constraints are checked in the
//! write transaction that inserts the user, so a concurrent duplicate
//! registration fails with `StorageError::AlreadyExists` instead of
//! producing a second record.

use chrono::{DateTime, Utc};
use redb::ReadableTable;
use serde::{Deserialize, Serialize};

use super::super::database::{next_id, Database, EMAILS, USERNAMES, USERS};
use super::super::{StorageError, StorageResult, UserId};
use crate::auth::password::PasswordDigest;

/// User record as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    /// Unique, immutable user identifier (owner key)
    pub id: UserId,
    /// Unique login name
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Password digest (never the plaintext)
    pub password_digest: PasswordDigest,
    /// When the user registered
    pub created_at: DateTime<Utc>,
}

/// Repository for user operations.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Look up a user by exact username.
    pub fn find_by_username(&self, username: &str) -> StorageResult<Option<StoredUser>> {
        let read_txn = self.db.begin_read()?;
        let names = read_txn.open_table(USERNAMES)?;
        let Some(user_id) = names.get(username)?.map(|v| v.value()) else {
            return Ok(None);
        };

        let users = read_txn.open_table(USERS)?;
        match users.get(user_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Insert a new user.
    ///
    /// # Errors
    /// Returns `StorageError::AlreadyExists` if the username or the email
    /// (compared case-insensitively) is already registered.
    pub fn create(
        &self,
        username: &str,
        email: &str,
        password_digest: PasswordDigest,
    ) -> StorageResult<StoredUser> {
        let email_key = email.to_lowercase();

        let write_txn = self.db.begin_write()?;
        let user = {
            let mut names = write_txn.open_table(USERNAMES)?;
            if names.get(username)?.is_some() {
                return Err(StorageError::AlreadyExists(format!("User {username}")));
            }

            let mut emails = write_txn.open_table(EMAILS)?;
            if emails.get(email_key.as_str())?.is_some() {
                return Err(StorageError::AlreadyExists(format!("Email {email}")));
            }

            let user = StoredUser {
                id: next_id(&write_txn, "users")?,
                username: username.to_string(),
                email: email.to_string(),
                password_digest,
                created_at: Utc::now(),
            };

            let json = serde_json::to_vec(&user)?;
            write_txn.open_table(USERS)?.insert(user.id, json.as_slice())?;
            names.insert(username, user.id)?;
            emails.insert(email_key.as_str(), user.id)?;
            user
        };
        write_txn.commit()?;

        tracing::info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }
}
