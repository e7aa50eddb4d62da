// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies for the REST API. All types derive
//! `ToSchema` for the OpenAPI document; request bodies derive `Deserialize`
//! and responses derive `Serialize`.
//!
//! ## Model Categories
//!
//! - **Auth**: registration and login
//! - **Bucketlists**: owned collections, expanded with their items
//! - **Items**: entries within one bucketlist
//!
//! Stored records never leave the crate directly; the `From` impls below
//! are the only path from storage types to response bodies, which keeps the
//! password digest out of every response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::listing::{ListWithItems, PageResult};
use crate::storage::{StoredItem, StoredList, StoredUser};

// =============================================================================
// Auth Models
// =============================================================================

/// Request to register a new user.
///
/// Missing fields deserialize as empty strings and are rejected by
/// validation, so callers get a message rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Request to log in.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserSummary {
    pub id: u64,
    pub username: String,
    pub email: String,
}

impl From<StoredUser> for UserSummary {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    /// Access token, valid for ten minutes.
    pub token: String,
}

// =============================================================================
// Bucketlist Models
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateBucketListRequest {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateBucketListRequest {
    pub name: String,
}

/// A bucketlist with its items in creation order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct BucketList {
    pub id: u64,
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    /// Owner user ID.
    pub created_by: u64,
    pub items: Vec<BucketListItem>,
}

impl BucketList {
    pub fn with_items(list: StoredList, items: Vec<StoredItem>) -> Self {
        Self {
            id: list.id,
            name: list.name,
            date_created: list.created_at,
            date_modified: list.modified_at,
            created_by: list.owner_id,
            items: items.into_iter().map(BucketListItem::from).collect(),
        }
    }
}

impl From<ListWithItems> for BucketList {
    fn from(expanded: ListWithItems) -> Self {
        BucketList::with_items(expanded.list, expanded.items)
    }
}

/// Answer to a create request: the new list, or a note that the owner
/// already has one by that name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CreateBucketListResponse {
    Created(BucketList),
    AlreadyExists(MessageResponse),
}

/// Query parameters for `GET /api/v1/bucketlists`.
///
/// Kept as raw strings so bad values reach the listing rules instead of
/// failing extraction.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListingParams {
    /// Case-insensitive name search; a non-blank value disables paging.
    pub q: Option<String>,
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size (default 20, max 100).
    pub limit: Option<String>,
}

/// One page of bucketlists.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BucketListPage {
    pub bucketlists: Vec<BucketList>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page: Option<String>,
    pub previous_page: Option<String>,
}

impl From<PageResult> for BucketListPage {
    fn from(result: PageResult) -> Self {
        Self {
            bucketlists: result.lists.into_iter().map(BucketList::from).collect(),
            page: result.page,
            limit: result.limit,
            total: result.total,
            has_next: result.has_next,
            has_previous: result.has_previous,
            next_page: result.next_page,
            previous_page: result.previous_page,
        }
    }
}

/// Either a page of bucketlists or the matches of a search.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum BucketListListing {
    Page(BucketListPage),
    Matches(Vec<BucketList>),
}

// =============================================================================
// Item Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct BucketListItem {
    pub id: u64,
    pub name: String,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
    pub bucketlist_id: u64,
    pub done: bool,
}

impl From<StoredItem> for BucketListItem {
    fn from(item: StoredItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            date_created: item.created_at,
            date_modified: item.modified_at,
            bucketlist_id: item.bucketlist_id,
            done: item.done,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateItemRequest {
    pub name: String,
}

/// Partial item update. `name` wins when both fields are present.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateItemRequest {
    pub name: Option<String>,
    pub done: Option<bool>,
}

// =============================================================================
// Shared
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
