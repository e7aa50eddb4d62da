// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Persistent Storage Module
//!
//! This module provides persistent storage backed by an embedded **redb**
//! database. Users, bucketlists, and items live in a single database file.
//!
//! ## Table Layout
//!
//! ```text
//! users        id -> JSON StoredUser
//! usernames    username -> user id           (unique)
//! emails       lowercase email -> user id    (unique)
//! lists        id -> JSON StoredList
//! owner_lists  (owner_id, list_id) -> ()     (creation order per owner)
//! list_names   (owner_id, name) -> list id   (unique per owner)
//! items        id -> JSON StoredItem
//! list_items   (list_id, item_id) -> ()      (creation order per list)
//! sequences    table name -> last issued id
//! ```
//!
//! ## Consistency Model
//!
//! - Every repository call runs in its own read or write transaction and
//!   commits before returning. No transaction outlives an operation.
//! - redb admits one write transaction at a time, so a uniqueness check and
//!   the insert it guards always run in the same write transaction. Two
//!   concurrent identical creations cannot both commit.
//! - Deleting a bucketlist removes its items in the same transaction.

pub mod database;
pub mod ownership;
pub mod repository;

pub use database::Database;
pub use ownership::{OwnedResource, OwnershipCheck};
pub use repository::{
    ItemRepository, ItemUpdate, ListCreation, ListRepository, StoredItem, StoredList, StoredUser,
    UserRepository,
};

/// Identifier of a user, and therefore of a resource owner.
pub type UserId = u64;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Entity absent, or present but owned by someone else.
    #[error("{0} does not exist")]
    NotFound(String),

    /// A uniqueness constraint rejected the write.
    #[error("{0} already exists")]
    AlreadyExists(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
