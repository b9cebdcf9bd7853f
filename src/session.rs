//! Signed session tokens
//!
//! A token is `<expires_at_ms>.<signature>`, where the signature is the first
//! 32 hex characters of `SHA-256("<expires_at_ms>:<secret>")`. Tokens carry no
//! identity: holding a valid one means the bearer knew the shared password
//! before the expiry.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "art-class-auth";

const SIGNATURE_LEN: usize = 32;

#[derive(Clone)]
pub struct SessionSigner {
    secret: String,
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSigner").finish_non_exhaustive()
    }
}

impl SessionSigner {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn sign(&self, payload: &str) -> String {
        let digest = Sha256::digest(format!("{}:{}", payload, self.secret).as_bytes());
        let mut signature = hex::encode(digest);
        signature.truncate(SIGNATURE_LEN);
        signature
    }

    /// Build a token that expires at `expires_at_ms` (unix milliseconds)
    pub fn generate_token(&self, expires_at_ms: i64) -> String {
        format!("{}.{}", expires_at_ms, self.sign(&expires_at_ms.to_string()))
    }

    /// Build a token for a session starting now
    pub fn issue(&self, now: DateTime<Utc>, duration: chrono::Duration) -> String {
        self.generate_token((now + duration).timestamp_millis())
    }

    /// Check a token against the secret and the clock.
    ///
    /// Malformed, expired and forged tokens are all just `false`.
    pub fn validate_token(&self, token: &str, now_ms: i64) -> bool {
        let Some((expires_at_str, signature)) = token.split_once('.') else {
            return false;
        };

        let expires_at = match expires_at_str.parse::<i64>() {
            Ok(value) if value != 0 => value,
            _ => return false,
        };

        if signature.is_empty() || now_ms > expires_at {
            return false;
        }

        signature
            .as_bytes()
            .ct_eq(self.sign(expires_at_str).as_bytes())
            .into()
    }
}
