//! Authorization for write endpoints
//!
//! The write boundary extracts a bearer token and hands it to an injected
//! [`TokenVerifier`]. Two verifiers exist: header presence only, and HS256
//! JWT validation.

mod jwt;
mod middleware;

pub use jwt::JwtVerifier;
pub use middleware::{require_bearer, Editor};

use crate::error::AppError;

/// Decides whether a bearer token may write
pub trait TokenVerifier: Send + Sync {
    /// Returns the authenticated subject on success
    fn verify(&self, token: &str) -> Result<String, AppError>;

    fn describe(&self) -> &'static str;
}

/// Accepts any non-empty token. Matches deployments without a shared secret.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderPresenceVerifier;

impl TokenVerifier for HeaderPresenceVerifier {
    fn verify(&self, token: &str) -> Result<String, AppError> {
        if token.trim().is_empty() {
            return Err(AppError::Unauthorized("Empty bearer token".to_string()));
        }
        Ok("anonymous".to_string())
    }

    fn describe(&self) -> &'static str {
        "header-presence"
    }
}
