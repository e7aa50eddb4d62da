// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::response::{IntoResponse, Response};

use super::token::TokenError;
use crate::error::{ApiError, ErrorKind};

/// Why a request was refused at the authentication boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No (or an empty) Authorization header
    #[error("Register or log in to access this resource")]
    MissingCredential,
    /// Token signature valid but expired
    #[error("Expired token. Please log in to get a new token")]
    ExpiredCredential,
    /// Token signature invalid or claims unparsable
    #[error("Invalid token. Please register or log in")]
    MalformedCredential,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "unauthenticated",
            AuthError::ExpiredCredential => "token_expired",
            AuthError::MalformedCredential => "token_malformed",
        }
    }

    /// Error category for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingCredential => ErrorKind::Unauthenticated,
            AuthError::ExpiredCredential | AuthError::MalformedCredential => ErrorKind::Unauthorized,
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::ExpiredCredential => AuthError::ExpiredCredential,
            TokenError::MalformedCredential | TokenError::Signing(_) => {
                AuthError::MalformedCredential
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::new(err.kind(), err.to_string()).with_code(err.error_code())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::StatusCode};

    #[tokio::test]
    async fn missing_credential_returns_401() {
        let response = AuthError::MissingCredential.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "unauthenticated");
        assert_eq!(body["error"], "Register or log in to access this resource");
    }

    #[test]
    fn token_failures_keep_their_messages() {
        let expired = AuthError::from(TokenError::ExpiredCredential);
        let malformed = AuthError::from(TokenError::MalformedCredential);

        assert_eq!(expired.kind(), ErrorKind::Unauthorized);
        assert_eq!(malformed.kind(), ErrorKind::Unauthorized);
        assert_eq!(expired.to_string(), TokenError::ExpiredCredential.to_string());
        assert_eq!(malformed.to_string(), TokenError::MalformedCredential.to_string());
        assert_ne!(expired.to_string(), malformed.to_string());
    }
}
