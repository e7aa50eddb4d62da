// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::TokenService;
use crate::storage::Database;

/// Shared, read-only handles passed to every handler.
///
/// The database serializes its own writers; the token service holds
/// immutable key material. Neither needs a lock here.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(db: Database, tokens: TokenService) -> Self {
        Self {
            db: Arc::new(db),
            tokens: Arc::new(tokens),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_state() -> (AppState, tempfile::TempDir) {
    let (db, dir) = crate::storage::database::temp_db();
    let state = AppState::new(db, TokenService::new(b"test-state-secret"));
    (state, dir)
}
