//! Authentication configuration (Supabase JWT)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

const MIN_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret. Absent only in development, where every bearer
    /// token is rejected.
    #[serde(default)]
    pub jwt_secret: Option<SecretString>,

    #[serde(default = "default_audience")]
    pub audience: String,

    #[serde(default)]
    pub issuer: Option<String>,
}

impl AuthConfig {
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match &self.jwt_secret {
            None if *environment == Environment::Production => {
                Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
            }
            Some(secret) if secret.expose_secret().len() < MIN_SECRET_LENGTH => {
                Err(ValidationError::WeakJwtSecret)
            }
            _ => Ok(()),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            audience: default_audience(),
            issuer: None,
        }
    }
}

fn default_audience() -> String {
    crate::adapters::auth::DEFAULT_AUDIENCE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(raw: &str) -> Option<SecretString> {
        Some(SecretString::new(raw.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.audience, "authenticated");
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_production_requires_secret() {
        let config = AuthConfig::default();
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: secret("too-short"),
            ..Default::default()
        };
        assert_eq!(config.validate(&Environment::Development), Err(ValidationError::WeakJwtSecret));
    }

    #[test]
    fn test_valid_config() {
        let config = AuthConfig {
            jwt_secret: secret("0123456789abcdef0123456789abcdef"),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }
}
