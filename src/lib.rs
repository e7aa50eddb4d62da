// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bucketlist Server - owner-scoped lists and items behind token auth
//!
//! Users register, log in for a short-lived access token, and manage their
//! own bucketlists and the items inside them. Every list and item
//! operation is filtered by the token's subject.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Tokens, credential checks and the request gate
//! - `listing` - Search and pagination over an owner's bucketlists
//! - `storage` - Embedded redb storage with owner-scoped repositories

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod listing;
pub mod models;
pub mod state;
pub mod storage;
