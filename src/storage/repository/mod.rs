// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the database.
//!
//! Each repository provides CRUD operations for a specific entity type.
//! Bucketlist and item repositories take the requesting owner on every call
//! and never return records belonging to anyone else.

pub mod items;
pub mod lists;
pub mod users;

pub use items::{ItemRepository, ItemUpdate, StoredItem};
pub use lists::{ListCreation, ListRepository, StoredList};
pub use users::{StoredUser, UserRepository};
