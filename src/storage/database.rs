// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded database backed by redb (pure Rust, ACID).
//!
//! Table definitions live here so every repository opens the same tables.
//! Records are stored as JSON bytes keyed by a `u64` id; secondary tables
//! hold the ownership and uniqueness indexes.

use std::ops::RangeInclusive;
use std::path::Path;

use redb::{ReadTransaction, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};
use serde::de::DeserializeOwned;

use super::StorageResult;

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: user id → serialized StoredUser (JSON bytes).
pub(crate) const USERS: TableDefinition<u64, &[u8]> = TableDefinition::new("users");

/// Unique index: username → user id.
pub(crate) const USERNAMES: TableDefinition<&str, u64> = TableDefinition::new("usernames");

/// Unique index: lowercase email → user id.
pub(crate) const EMAILS: TableDefinition<&str, u64> = TableDefinition::new("emails");

/// Primary table: list id → serialized StoredList (JSON bytes).
pub(crate) const LISTS: TableDefinition<u64, &[u8]> = TableDefinition::new("lists");

/// Index: (owner_id, list_id) → (). Range scans yield an owner's lists in
/// creation order because ids are issued monotonically.
pub(crate) const OWNER_LISTS: TableDefinition<(u64, u64), ()> =
    TableDefinition::new("owner_lists");

/// Unique index: (owner_id, name) → list id.
pub(crate) const LIST_NAMES: TableDefinition<(u64, &str), u64> =
    TableDefinition::new("list_names");

/// Primary table: item id → serialized StoredItem (JSON bytes).
pub(crate) const ITEMS: TableDefinition<u64, &[u8]> = TableDefinition::new("items");

/// Index: (list_id, item_id) → ().
pub(crate) const LIST_ITEMS: TableDefinition<(u64, u64), ()> = TableDefinition::new("list_items");

/// Sequences: table name → last issued id.
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

// =============================================================================
// Database
// =============================================================================

/// Handle to the embedded database file.
pub struct Database {
    db: redb::Database,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = redb::Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(USERS)?;
            write_txn.open_table(USERNAMES)?;
            write_txn.open_table(EMAILS)?;
            write_txn.open_table(LISTS)?;
            write_txn.open_table(OWNER_LISTS)?;
            write_txn.open_table(LIST_NAMES)?;
            write_txn.open_table(ITEMS)?;
            write_txn.open_table(LIST_ITEMS)?;
            write_txn.open_table(SEQUENCES)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Open a read transaction on the users table. Used by health checks.
    pub fn check(&self) -> StorageResult<()> {
        let read_txn = self.db.begin_read()?;
        read_txn.open_table(USERS)?;
        Ok(())
    }

    pub(crate) fn begin_read(&self) -> StorageResult<ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    pub(crate) fn begin_write(&self) -> StorageResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }
}

/// Read and deserialize a JSON record by id.
pub(crate) fn get_json<T, R>(table: &R, id: u64) -> StorageResult<Option<T>>
where
    T: DeserializeOwned,
    R: ReadableTable<u64, &'static [u8]>,
{
    match table.get(id)? {
        Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
        None => Ok(None),
    }
}

/// Key range covering every `(parent, child)` entry of one parent.
pub(crate) fn children_of(parent: u64) -> RangeInclusive<(u64, u64)> {
    (parent, 0)..=(parent, u64::MAX)
}

/// Allocate the next id of a sequence inside an open write transaction.
///
/// The id is only consumed if the surrounding transaction commits.
pub(crate) fn next_id(txn: &WriteTransaction, sequence: &str) -> StorageResult<u64> {
    let mut table = txn.open_table(SEQUENCES)?;
    let current = table.get(sequence)?.map(|v| v.value()).unwrap_or(0);
    let next = current + 1;
    table.insert(sequence, next)?;
    Ok(next)
}

#[cfg(test)]
pub(crate) fn temp_db() -> (Database, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(&dir.path().join("test.redb")).unwrap();
    (db, dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("db.redb");
        Database::open(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn sequences_are_monotonic_and_independent() {
        let (db, _dir) = temp_db();
        let txn = db.begin_write().unwrap();
        assert_eq!(next_id(&txn, "lists").unwrap(), 1);
        assert_eq!(next_id(&txn, "lists").unwrap(), 2);
        assert_eq!(next_id(&txn, "items").unwrap(), 1);
        txn.commit().unwrap();

        let txn = db.begin_write().unwrap();
        assert_eq!(next_id(&txn, "lists").unwrap(), 3);
    }

    #[test]
    fn aborted_transaction_does_not_consume_ids() {
        let (db, _dir) = temp_db();
        {
            let txn = db.begin_write().unwrap();
            assert_eq!(next_id(&txn, "users").unwrap(), 1);
            txn.abort().unwrap();
        }
        let txn = db.begin_write().unwrap();
        assert_eq!(next_id(&txn, "users").unwrap(), 1);
    }
}
