// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The authentication gate.
//!
//! A pure decision from an `Authorization` header value to either a
//! resolved subject or a refusal. The gate does no I/O and keeps no state;
//! the router layer and the `Auth` extractor both call into it.

use super::{AuthError, AuthenticatedUser, TokenService};

/// Pull the token out of an `Authorization` header value.
///
/// Accepts both a raw token and `Bearer <token>`. Returns `None` for a
/// blank value, including a bare `Bearer` scheme with no token.
fn token_from_header(value: &str) -> Option<&str> {
    let value = value.trim();
    let token = match value.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => value,
    };
    (!token.is_empty()).then_some(token)
}

/// Resolve the subject of a request from its `Authorization` header.
///
/// # Errors
/// - `AuthError::MissingCredential` if the header is absent or blank
/// - `AuthError::ExpiredCredential` / `AuthError::MalformedCredential` if
///   token verification fails
pub fn authorize(tokens: &TokenService, header: Option<&str>) -> Result<AuthenticatedUser, AuthError> {
    let token = header
        .and_then(token_from_header)
        .ok_or(AuthError::MissingCredential)?;
    Ok(tokens.verify(token)?)
}

/// Run `operation` with the resolved subject, or refuse without running it.
pub fn guard<T, E, F>(tokens: &TokenService, header: Option<&str>, operation: F) -> Result<T, E>
where
    F: FnOnce(AuthenticatedUser) -> Result<T, E>,
    E: From<AuthError>,
{
    let user = authorize(tokens, header)?;
    operation(user)
}
