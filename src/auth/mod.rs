// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! This module issues and verifies access tokens and resolves the subject of
//! every protected request.
//!
//! ## Auth Flow
//!
//! 1. Client registers (`POST /api/v1/auth/register`)
//! 2. Client logs in (`POST /api/v1/auth/login`) and receives a token
//! 3. Client sends `Authorization: <token>` (or `Bearer <token>`)
//! 4. Server:
//!    - Verifies the HS256 signature with the process-wide secret
//!    - Rejects the token once `exp` has passed (10 minute TTL)
//!    - Hands `sub` to the handler as the owner of every list and item
//!      it touches
//!
//! ## Security
//!
//! - Tokens are stateless; nothing is stored per session
//! - Passwords are stored as argon2id digests only
//! - The signing secret is never serialized or logged

pub mod claims;
pub mod credentials;
pub mod error;
pub mod extractor;
pub mod gate;
pub mod middleware;
pub mod password;
pub mod token;

pub use claims::AuthenticatedUser;
pub use credentials::{CredentialError, CredentialStore};
pub use error::AuthError;
pub use extractor::Auth;
pub use token::{TokenError, TokenService};
