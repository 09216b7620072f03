//! HTTP DTOs for profile endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::profile::{ContactChannel, Preferences, Profile, ProfileDetails};
use crate::domain::foundation::Timestamp;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProfileRequest {
    pub full_name: String,
    /// Local or `+65` form; stored normalised.
    #[serde(default)]
    pub phone: Option<String>,
    pub email: String,
    #[serde(default)]
    pub preferences: Preferences,
}

impl From<UpsertProfileRequest> for ProfileDetails {
    fn from(request: UpsertProfileRequest) -> Self {
        Self {
            full_name: request.full_name,
            phone: request.phone.filter(|phone| !phone.trim().is_empty()),
            email: request.email,
            preferences: request.preferences,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: String,
    pub contact_channel: ContactChannel,
    pub marketing_opt_in: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        let preferences = *profile.preferences();
        Self {
            user_id: profile.user_id().to_string(),
            full_name: profile.full_name().to_string(),
            phone: profile.phone().map(|phone| phone.as_str().to_string()),
            email: profile.email().to_string(),
            contact_channel: preferences.contact_channel,
            marketing_opt_in: preferences.marketing_opt_in,
            created_at: *profile.created_at(),
            updated_at: *profile.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_default_when_omitted() {
        let request: UpsertProfileRequest = serde_json::from_value(serde_json::json!({
            "full_name": "Siti Nurhaliza",
            "email": "siti@example.sg"
        }))
        .unwrap();
        let details = ProfileDetails::from(request);
        assert_eq!(details.preferences.contact_channel, ContactChannel::Whatsapp);
        assert!(!details.preferences.marketing_opt_in);
    }

    #[test]
    fn blank_phone_is_dropped() {
        let request: UpsertProfileRequest = serde_json::from_value(serde_json::json!({
            "full_name": "Siti Nurhaliza",
            "email": "siti@example.sg",
            "phone": "  "
        }))
        .unwrap();
        assert!(ProfileDetails::from(request).phone.is_none());
    }
}
