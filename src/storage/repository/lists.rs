// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bucketlist repository.
//!
//! Every operation takes the requesting owner. A list that belongs to
//! someone else is reported as `StorageError::NotFound`, exactly like a list
//! that does not exist. The `(owner_id, name)` pair is unique and is
//! enforced by the `list_names` index inside each write transaction.

use chrono::{DateTime, Utc};
use redb::ReadableTable;
use serde::{Deserialize, Serialize};

use super::super::database::{
    children_of, get_json, next_id, Database, ITEMS, LISTS, LIST_ITEMS, LIST_NAMES, OWNER_LISTS,
};
use super::super::{OwnedResource, OwnershipCheck, StorageError, StorageResult, UserId};

/// Message used for absent or foreign bucketlists.
pub(crate) const LIST_MISSING: &str = "Bucketlist";

/// Bucketlist as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredList {
    /// Unique bucketlist identifier
    pub id: u64,
    /// Non-empty name, unique per owner
    pub name: String,
    /// Owner user ID
    pub owner_id: UserId,
    /// When the bucketlist was created
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub modified_at: DateTime<Utc>,
}

impl OwnedResource for StoredList {
    fn owner_id(&self) -> UserId {
        self.owner_id
    }

    fn describe(&self) -> String {
        format!("bucketlist {}", self.id)
    }
}

/// Outcome of a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListCreation {
    /// A new bucketlist was inserted.
    Created(StoredList),
    /// The owner already holds a bucketlist with that name; nothing changed.
    AlreadyExists(StoredList),
}

/// Load a bucketlist and check it belongs to `owner_id`.
pub(crate) fn owned_list<R>(lists: &R, owner_id: UserId, list_id: u64) -> StorageResult<StoredList>
where
    R: ReadableTable<u64, &'static [u8]>,
{
    get_json::<StoredList, _>(lists, list_id)?.owned_by(owner_id, LIST_MISSING)
}

/// Repository for bucketlist operations.
pub struct ListRepository<'a> {
    db: &'a Database,
}

impl<'a> ListRepository<'a> {
    /// Create a new ListRepository.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a bucketlist for `owner_id`.
    ///
    /// Returns [`ListCreation::AlreadyExists`] with the existing record when
    /// the owner already has a bucketlist by that name.
    pub fn create(&self, owner_id: UserId, name: &str) -> StorageResult<ListCreation> {
        let write_txn = self.db.begin_write()?;
        let list = {
            let mut names = write_txn.open_table(LIST_NAMES)?;
            let mut lists = write_txn.open_table(LISTS)?;

            let existing_id = names.get((owner_id, name))?.map(|v| v.value());
            if let Some(existing_id) = existing_id {
                let existing = owned_list(&lists, owner_id, existing_id)?;
                return Ok(ListCreation::AlreadyExists(existing));
            }

            let now = Utc::now();
            let list = StoredList {
                id: next_id(&write_txn, "lists")?,
                name: name.to_string(),
                owner_id,
                created_at: now,
                modified_at: now,
            };

            let json = serde_json::to_vec(&list)?;
            lists.insert(list.id, json.as_slice())?;
            names.insert((owner_id, name), list.id)?;
            write_txn
                .open_table(OWNER_LISTS)?
                .insert((owner_id, list.id), ())?;
            list
        };
        write_txn.commit()?;

        Ok(ListCreation::Created(list))
    }

    /// Get a bucketlist owned by `owner_id`.
    pub fn get(&self, owner_id: UserId, list_id: u64) -> StorageResult<StoredList> {
        let read_txn = self.db.begin_read()?;
        let lists = read_txn.open_table(LISTS)?;
        owned_list(&lists, owner_id, list_id)
    }

    /// Rename a bucketlist owned by `owner_id` and refresh `modified_at`.
    ///
    /// # Errors
    /// - `StorageError::NotFound` if the list is absent or foreign
    /// - `StorageError::AlreadyExists` if the owner has another list by that name
    pub fn update(&self, owner_id: UserId, list_id: u64, name: &str) -> StorageResult<StoredList> {
        let write_txn = self.db.begin_write()?;
        let list = {
            let mut lists = write_txn.open_table(LISTS)?;
            let mut list = owned_list(&lists, owner_id, list_id)?;

            if list.name != name {
                let mut names = write_txn.open_table(LIST_NAMES)?;
                if names.get((owner_id, name))?.is_some() {
                    return Err(StorageError::AlreadyExists(format!("Bucketlist {name}")));
                }
                names.remove((owner_id, list.name.as_str()))?;
                names.insert((owner_id, name), list_id)?;
                list.name = name.to_string();
            }
            list.modified_at = Utc::now();

            let json = serde_json::to_vec(&list)?;
            lists.insert(list_id, json.as_slice())?;
            list
        };
        write_txn.commit()?;

        Ok(list)
    }

    /// Delete a bucketlist owned by `owner_id` together with all its items.
    pub fn delete(&self, owner_id: UserId, list_id: u64) -> StorageResult<StoredList> {
        let write_txn = self.db.begin_write()?;
        let (list, removed_items) = {
            let mut lists = write_txn.open_table(LISTS)?;
            let list = owned_list(&lists, owner_id, list_id)?;

            lists.remove(list_id)?;
            write_txn
                .open_table(OWNER_LISTS)?
                .remove((owner_id, list_id))?;
            write_txn
                .open_table(LIST_NAMES)?
                .remove((owner_id, list.name.as_str()))?;

            let mut list_items = write_txn.open_table(LIST_ITEMS)?;
            let item_ids = list_items
                .range(children_of(list_id))?
                .map(|entry| entry.map(|(key, _)| key.value().1))
                .collect::<Result<Vec<u64>, _>>()?;

            let mut items = write_txn.open_table(ITEMS)?;
            for item_id in &item_ids {
                items.remove(*item_id)?;
                list_items.remove((list_id, *item_id))?;
            }
            (list, item_ids.len())
        };
        write_txn.commit()?;

        tracing::debug!(list_id, removed_items, "Bucketlist deleted with its items");
        Ok(list)
    }

    /// List all bucketlists owned by `owner_id`, in creation order.
    pub fn list_by_owner(&self, owner_id: UserId) -> StorageResult<Vec<StoredList>> {
        let (lists, _) = self.page_by_owner(owner_id, 0, usize::MAX)?;
        Ok(lists)
    }

    /// One window of the owner's bucketlists, in creation order, plus the
    /// owner's total list count from the same snapshot.
    ///
    /// Skips `offset` lists and returns at most `limit`.
    pub fn page_by_owner(
        &self,
        owner_id: UserId,
        offset: usize,
        limit: usize,
    ) -> StorageResult<(Vec<StoredList>, usize)> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(OWNER_LISTS)?;
        let lists = read_txn.open_table(LISTS)?;

        let mut page = Vec::new();
        let mut total = 0;
        for entry in index.range(children_of(owner_id))? {
            let (key, _) = entry?;
            if total >= offset && page.len() < limit {
                if let Some(list) = get_json::<StoredList, _>(&lists, key.value().1)? {
                    page.push(list);
                }
            }
            total += 1;
        }

        Ok((page, total))
    }
}
