// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access token issuance and verification.
//!
//! Tokens are HS256-signed JWTs carrying `sub`, `iat` and `exp`. They are
//! never stored: verification recomputes the signature and checks expiry
//! against the current clock, with no leeway.
//!
//! `TokenService` holds only immutable key material, so one instance is
//! shared by every request handler.

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{AuthenticatedUser, Claims};
use crate::storage::UserId;

/// Token lifetime (10 minutes).
pub const TOKEN_TTL_SECS: i64 = 600;

/// Token verification failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Signature valid but `exp` has passed
    #[error("Expired token. Please log in to get a new token")]
    ExpiredCredential,
    /// Bad signature, wrong algorithm, or unparsable claims
    #[error("Invalid token. Please register or log in")]
    MalformedCredential,
    /// Encoding failed while issuing
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Issues and verifies signed, expiring access tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    /// Create a token service keyed with a symmetric secret.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: TOKEN_TTL_SECS,
        }
    }

    /// Issue a token for `subject`, valid from now for the token TTL.
    pub fn issue(&self, subject: UserId) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    /// Issue a token as if the clock read `issued_at` (Unix seconds).
    pub fn issue_at(&self, subject: UserId, issued_at: i64) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at + self.ttl_secs,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and resolve its subject.
    ///
    /// # Errors
    /// - `TokenError::ExpiredCredential` if the signature is valid but `exp` has passed
    /// - `TokenError::MalformedCredential` for anything else that fails
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::ExpiredCredential,
                _ => TokenError::MalformedCredential,
            },
        )?;

        AuthenticatedUser::from_claims(token_data.claims).ok_or(TokenError::MalformedCredential)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    fn service() -> TokenService {
        TokenService::new(b"test-token-secret")
    }

    #[test]
    fn issued_token_verifies_to_subject() {
        let tokens = service();
        let token = tokens.issue(42).unwrap();
        let user = tokens.verify(&token).unwrap();

        assert_eq!(user.user_id, 42);
        assert_eq!(user.expires_at - user.issued_at, TOKEN_TTL_SECS);
    }

    #[test]
    fn token_is_url_safe() {
        let token = service().issue(42).unwrap();
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')));
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let tokens = service();
        let issued_at = Utc::now().timestamp() - TOKEN_TTL_SECS - 1;
        let token = tokens.issue_at(42, issued_at).unwrap();

        assert_eq!(tokens.verify(&token), Err(TokenError::ExpiredCredential));
    }

    #[test]
    fn token_within_ttl_is_accepted() {
        let tokens = service();
        let issued_at = Utc::now().timestamp() - TOKEN_TTL_SECS + 30;
        let token = tokens.issue_at(7, issued_at).unwrap();

        assert_eq!(tokens.verify(&token).unwrap().user_id, 7);
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let token = TokenService::new(b"secret-1").issue(42).unwrap();
        let result = TokenService::new(b"secret-2").verify(&token);
        assert_eq!(result, Err(TokenError::MalformedCredential));
    }

    #[test]
    fn expired_token_with_wrong_secret_is_malformed() {
        let issued_at = Utc::now().timestamp() - 3 * TOKEN_TTL_SECS;
        let token = TokenService::new(b"secret-1").issue_at(42, issued_at).unwrap();
        let result = TokenService::new(b"secret-2").verify(&token);
        assert_eq!(result, Err(TokenError::MalformedCredential));
    }

    #[test]
    fn garbage_is_malformed() {
        let tokens = service();
        assert_eq!(tokens.verify("not-a-token"), Err(TokenError::MalformedCredential));
        assert_eq!(tokens.verify(""), Err(TokenError::MalformedCredential));
    }

    #[test]
    fn tampered_subject_is_malformed() {
        let tokens = service();
        let token = tokens.issue(42).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let now = Utc::now().timestamp();
        let forged = format!(
            r#"{{"sub":"1","iat":{now},"exp":{}}}"#,
            now + TOKEN_TTL_SECS
        );
        let tampered = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode(forged.as_bytes()),
            parts[2]
        );

        assert_eq!(tokens.verify(&tampered), Err(TokenError::MalformedCredential));
    }

    #[test]
    fn unsigned_token_is_malformed() {
        let now = Utc::now().timestamp();
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(
            format!(r#"{{"sub":"42","iat":{now},"exp":{}}}"#, now + 600).as_bytes(),
        );
        let token = format!("{header}.{claims}.");

        assert_eq!(service().verify(&token), Err(TokenError::MalformedCredential));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let rendered = format!("{:?}", TokenService::new(b"super-secret-value"));
        assert!(!rendered.contains("super-secret-value"));
    }
}
