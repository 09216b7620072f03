//! Session validation port for bearer tokens.
//!
//! Provider-agnostic: the production adapter validates Supabase-issued JWTs,
//! tests use an in-memory token table.
//!
//! All implementations MUST validate:
//! - **Signature**: Token was issued by the expected auth provider
//! - **Audience (aud)**: Token is intended for this application
//! - **Expiry (exp)**: Token is not expired

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// HTTP middleware uses this to validate Bearer tokens.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed or badly signed tokens
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
