//! Supabase JWT adapter for session validation.
//!
//! Supabase signs access tokens with the project's JWT secret (HS256). This
//! adapter validates them locally:
//!
//! 1. Signature against the shared secret
//! 2. Audience (`authenticated` by default) and expiry
//! 3. Issuer, when one is configured
//! 4. Maps claims to the domain `AuthenticatedUser`; `app_metadata.role ==
//!    "admin"` grants the admin role
//!
//! # Example
//!
//! ```ignore
//! use iaircon::adapters::auth::{SupabaseConfig, SupabaseSessionValidator};
//!
//! let config = SupabaseConfig::new(secret, "authenticated");
//! let validator = SupabaseSessionValidator::new(config);
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, UserRole};
use crate::ports::SessionValidator;

/// Audience Supabase stamps on tokens of signed-in users.
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// Configuration for the Supabase validator.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Project JWT secret.
    pub jwt_secret: SecretString,

    /// Expected `aud` claim.
    pub audience: String,

    /// Expected `iss` claim, e.g. `https://xyz.supabase.co/auth/v1`.
    pub issuer: Option<String>,
}

impl SupabaseConfig {
    pub fn new(jwt_secret: SecretString, audience: impl Into<String>) -> Self {
        Self {
            jwt_secret,
            audience: audience.into(),
            issuer: None,
        }
    }

    /// Also require a matching issuer.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

/// JWT claims structure for Supabase access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SupabaseClaims {
    /// Subject - the auth user id
    pub sub: String,

    pub aud: String,

    /// Expiry timestamp (Unix epoch seconds)
    pub exp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Postgres role, normally `authenticated`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default)]
    pub app_metadata: AppMetadata,
}

/// Server-controlled metadata; users cannot edit it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct AppMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SupabaseClaims {
    fn user_role(&self) -> UserRole {
        match self.app_metadata.role.as_deref() {
            Some("admin") => UserRole::Admin,
            _ => UserRole::Customer,
        }
    }
}

/// Supabase session validator.
///
/// This is the production implementation of `SessionValidator`.
pub struct SupabaseSessionValidator {
    config: SupabaseConfig,
    decoding_key: DecodingKey,
}

impl SupabaseSessionValidator {
    pub fn new(config: SupabaseConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes());
        Self {
            config,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        if let Some(issuer) = &self.config.issuer {
            validation.set_issuer(&[issuer]);
            validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);
        } else {
            validation.set_required_spec_claims(&["exp", "aud", "sub"]);
        }
        validation
    }
}

#[async_trait]
impl SessionValidator for SupabaseSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let token_data = decode::<SupabaseClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidAudience => {
                        tracing::warn!("Invalid audience in token");
                        AuthError::InvalidToken
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Invalid issuer in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::debug!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;
        let claims = token_data.claims;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;
        let role = claims.user_role();

        Ok(AuthenticatedUser::new(
            user_id,
            claims.email.unwrap_or_default(),
            role,
        ))
    }
}

impl std::fmt::Debug for SupabaseSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseSessionValidator")
            .field("audience", &self.config.audience)
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}
