// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bucketlist item repository.
//!
//! Items have no owner of their own. An item is reachable only through its
//! parent bucketlist, and only when the caller owns that bucketlist; the
//! parent check runs in the same transaction as the item access.

use chrono::{DateTime, Utc};
use redb::ReadableTable;
use serde::{Deserialize, Serialize};

use super::super::database::{children_of, get_json, next_id, Database, ITEMS, LISTS, LIST_ITEMS};
use super::super::{StorageError, StorageResult, UserId};
use super::lists::owned_list;

const ITEM_MISSING: &str = "Bucketlist item";

/// Bucketlist item as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredItem {
    /// Unique item identifier
    pub id: u64,
    /// Item name
    pub name: String,
    /// Parent bucketlist (immutable after creation)
    pub bucketlist_id: u64,
    /// Completion flag
    pub done: bool,
    /// When the item was created
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub modified_at: DateTime<Utc>,
}

/// A partial update to an item. Renaming and completion are applied
/// independently of each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemUpdate {
    Rename(String),
    SetDone(bool),
}

/// Look up an item and check it sits in `list_id`.
fn item_in_list<R>(items: &R, list_id: u64, item_id: u64) -> StorageResult<StoredItem>
where
    R: ReadableTable<u64, &'static [u8]>,
{
    match get_json::<StoredItem, _>(items, item_id)? {
        Some(item) if item.bucketlist_id == list_id => Ok(item),
        _ => Err(StorageError::NotFound(ITEM_MISSING.to_string())),
    }
}

/// Repository for item operations.
pub struct ItemRepository<'a> {
    db: &'a Database,
}

impl<'a> ItemRepository<'a> {
    /// Create a new ItemRepository.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Add an item to a bucketlist owned by `owner_id`.
    pub fn create(&self, owner_id: UserId, list_id: u64, name: &str) -> StorageResult<StoredItem> {
        let write_txn = self.db.begin_write()?;
        let item = {
            owned_list(&write_txn.open_table(LISTS)?, owner_id, list_id)?;

            let now = Utc::now();
            let item = StoredItem {
                id: next_id(&write_txn, "items")?,
                name: name.to_string(),
                bucketlist_id: list_id,
                done: false,
                created_at: now,
                modified_at: now,
            };

            let json = serde_json::to_vec(&item)?;
            write_txn.open_table(ITEMS)?.insert(item.id, json.as_slice())?;
            write_txn
                .open_table(LIST_ITEMS)?
                .insert((list_id, item.id), ())?;
            item
        };
        write_txn.commit()?;

        Ok(item)
    }

    /// Get one item of a bucketlist owned by `owner_id`.
    pub fn get(&self, owner_id: UserId, list_id: u64, item_id: u64) -> StorageResult<StoredItem> {
        let read_txn = self.db.begin_read()?;
        owned_list(&read_txn.open_table(LISTS)?, owner_id, list_id)?;
        item_in_list(&read_txn.open_table(ITEMS)?, list_id, item_id)
    }

    /// All items of a bucketlist owned by `owner_id`, in creation order.
    pub fn list_by_list(&self, owner_id: UserId, list_id: u64) -> StorageResult<Vec<StoredItem>> {
        let read_txn = self.db.begin_read()?;
        owned_list(&read_txn.open_table(LISTS)?, owner_id, list_id)?;

        let index = read_txn.open_table(LIST_ITEMS)?;
        let items = read_txn.open_table(ITEMS)?;

        let mut result = Vec::new();
        for entry in index.range(children_of(list_id))? {
            let (key, _) = entry?;
            if let Some(item) = get_json::<StoredItem, _>(&items, key.value().1)? {
                result.push(item);
            }
        }
        Ok(result)
    }

    /// Apply a partial update to an item and refresh `modified_at`.
    pub fn update(
        &self,
        owner_id: UserId,
        list_id: u64,
        item_id: u64,
        update: ItemUpdate,
    ) -> StorageResult<StoredItem> {
        let write_txn = self.db.begin_write()?;
        let item = {
            owned_list(&write_txn.open_table(LISTS)?, owner_id, list_id)?;

            let mut items = write_txn.open_table(ITEMS)?;
            let mut item = item_in_list(&items, list_id, item_id)?;
            match update {
                ItemUpdate::Rename(name) => item.name = name,
                ItemUpdate::SetDone(done) => item.done = done,
            }
            item.modified_at = Utc::now();

            let json = serde_json::to_vec(&item)?;
            items.insert(item_id, json.as_slice())?;
            item
        };
        write_txn.commit()?;

        Ok(item)
    }

    /// Delete one item of a bucketlist owned by `owner_id`.
    pub fn delete(&self, owner_id: UserId, list_id: u64, item_id: u64) -> StorageResult<StoredItem> {
        let write_txn = self.db.begin_write()?;
        let item = {
            owned_list(&write_txn.open_table(LISTS)?, owner_id, list_id)?;

            let mut items = write_txn.open_table(ITEMS)?;
            let item = item_in_list(&items, list_id, item_id)?;
            items.remove(item_id)?;
            write_txn
                .open_table(LIST_ITEMS)?
                .remove((list_id, item_id))?;
            item
        };
        write_txn.commit()?;

        Ok(item)
    }
}
