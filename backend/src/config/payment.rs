//! Payment configuration (Stripe checkout)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::application::handlers::payment::CheckoutSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe webhook signing secret (`whsec_...`)
    #[serde(default)]
    pub webhook_secret: Option<SecretString>,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_success_url")]
    pub success_url: String,

    #[serde(default = "default_cancel_url")]
    pub cancel_url: String,

    /// Base URL for hosted checkout pages
    #[serde(default = "default_checkout_base_url")]
    pub checkout_base_url: String,
}

impl PaymentConfig {
    pub fn checkout_settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            currency: self.currency.to_lowercase(),
            success_url: self.success_url.clone(),
            cancel_url: self.cancel_url.clone(),
        }
    }

    /// Secret for webhook verification. Development falls back to a fixed
    /// local value so the stub flow works end to end.
    pub fn webhook_secret_or_dev(&self) -> SecretString {
        self.webhook_secret
            .clone()
            .unwrap_or_else(|| SecretString::new("whsec_local_development".to_string()))
    }

    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        match &self.webhook_secret {
            None if *environment == Environment::Production => {
                return Err(ValidationError::MissingRequired("PAYMENT__WEBHOOK_SECRET"));
            }
            Some(secret) if !secret.expose_secret().starts_with("whsec_") => {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
            _ => {}
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidValue {
                field: "payment.currency",
                reason: format!("'{}' is not an ISO 4217 code", self.currency),
            });
        }
        for (field, url) in [
            ("payment.success_url", &self.success_url),
            ("payment.cancel_url", &self.cancel_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidValue {
                    field,
                    reason: "must be an absolute http(s) URL".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            webhook_secret: None,
            currency: default_currency(),
            success_url: default_success_url(),
            cancel_url: default_cancel_url(),
            checkout_base_url: default_checkout_base_url(),
        }
    }
}

fn default_currency() -> String {
    "sgd".to_string()
}

fn default_success_url() -> String {
    "http://localhost:5173/booking/success".to_string()
}

fn default_cancel_url() -> String {
    "http://localhost:5173/booking/cancelled".to_string()
}

fn default_checkout_base_url() -> String {
    "https://checkout.stripe.test/pay".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid_in_development() {
        let config = PaymentConfig::default();
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(config.checkout_settings().currency, "sgd");
    }

    #[test]
    fn test_production_requires_webhook_secret() {
        let config = PaymentConfig::default();
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::MissingRequired("PAYMENT__WEBHOOK_SECRET"))
        );
    }

    #[test]
    fn test_webhook_secret_prefix() {
        let config = PaymentConfig {
            webhook_secret: Some(SecretString::new("sk_test_wrong".to_string())),
            ..Default::default()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidStripeWebhookSecret)
        );
    }

    #[test]
    fn test_relative_redirect_rejected() {
        let config = PaymentConfig {
            success_url: "/done".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidValue { field: "payment.success_url", .. })
        ));
    }
}
