//! Customer profile entity.

use serde::{Deserialize, Serialize};

use super::{ContactChannel, PhoneNumber};
use crate::domain::foundation::{DomainError, OwnedByUser, Timestamp, UserId, ValidationError};

/// Maximum length for the full name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Notification preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub contact_channel: ContactChannel,
    pub marketing_opt_in: bool,
}

/// Editable profile fields, used for both create and update.
#[derive(Debug, Clone)]
pub struct ProfileDetails {
    pub full_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub preferences: Preferences,
}

/// Customer profile. One per user, keyed by [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    user_id: UserId,
    full_name: String,
    phone: Option<PhoneNumber>,
    email: String,
    preferences: Preferences,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Profile {
    pub fn new(user_id: UserId, details: ProfileDetails) -> Result<Self, DomainError> {
        let (full_name, phone, email) = Self::validate(&details)?;
        let now = Timestamp::now();
        Ok(Self {
            user_id,
            full_name,
            phone,
            email,
            preferences: details.preferences,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a profile from persistence (no validation).
    pub fn reconstitute(
        user_id: UserId,
        full_name: String,
        phone: Option<PhoneNumber>,
        email: String,
        preferences: Preferences,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            user_id,
            full_name,
            phone,
            email,
            preferences,
            created_at,
            updated_at,
        }
    }

    /// Replace all editable fields. Nothing changes if validation fails.
    pub fn update(&mut self, details: ProfileDetails) -> Result<(), DomainError> {
        let (full_name, phone, email) = Self::validate(&details)?;
        self.full_name = full_name;
        self.phone = phone;
        self.email = email;
        self.preferences = details.preferences;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// First word of the full name, used in greetings.
    pub fn first_name(&self) -> &str {
        self.full_name.split_whitespace().next().unwrap_or(&self.full_name)
    }

    pub fn phone(&self) -> Option<&PhoneNumber> {
        self.phone.as_ref()
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    fn validate(details: &ProfileDetails) -> Result<(String, Option<PhoneNumber>, String), ValidationError> {
        let full_name = details.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(ValidationError::empty_field("full_name"));
        }
        let len = full_name.chars().count();
        if len > MAX_NAME_LENGTH {
            return Err(ValidationError::out_of_range(
                "full_name",
                1,
                MAX_NAME_LENGTH as i64,
                len as i64,
            ));
        }

        let phone = details
            .phone
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(PhoneNumber::new)
            .transpose()?;

        let email = details.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        let well_formed = email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'))
            .unwrap_or(false);
        if !well_formed {
            return Err(ValidationError::invalid_format("email", "not a valid email address"));
        }

        Ok((full_name, phone, email))
    }
}

impl OwnedByUser for Profile {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}
