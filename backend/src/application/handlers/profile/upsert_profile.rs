//! UpsertProfileHandler - Command handler for creating or updating a profile.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::profile::{Profile, ProfileDetails};
use crate::ports::ProfileRepository;

#[derive(Debug, Clone)]
pub struct UpsertProfileCommand {
    pub details: ProfileDetails,
}

pub struct UpsertProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl UpsertProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(
        &self,
        cmd: UpsertProfileCommand,
        metadata: CommandMetadata,
    ) -> Result<Profile, DomainError> {
        let profile = match self.profiles.find_by_user(&metadata.user_id).await? {
            Some(mut existing) => {
                existing.update(cmd.details)?;
                existing
            }
            None => Profile::new(metadata.user_id.clone(), cmd.details)?,
        };
        self.profiles.upsert(&profile).await?;

        info!(user_id = %profile.user_id(), "profile saved");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileRepository;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::profile::{ContactChannel, Preferences};

    fn details(name: &str, phone: &str) -> ProfileDetails {
        ProfileDetails {
            full_name: name.to_string(),
            phone: Some(phone.to_string()),
            email: "tan@example.sg".to_string(),
            preferences: Preferences {
                contact_channel: ContactChannel::Sms,
                marketing_opt_in: true,
            },
        }
    }

    #[tokio::test]
    async fn creates_then_updates_keeping_created_at() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        let handler = UpsertProfileHandler::new(repo.clone());

        let created = handler
            .handle(UpsertProfileCommand { details: details("Tan Ah Kow", "9123 4567") }, customer("cust-1"))
            .await
            .unwrap();
        let updated = handler
            .handle(UpsertProfileCommand { details: details("Tan Ah Beng", "81234567") }, customer("cust-1"))
            .await
            .unwrap();

        assert_eq!(created.phone().map(|p| p.as_str()), Some("+6591234567"));
        assert_eq!(updated.full_name(), "Tan Ah Beng");
        assert_eq!(updated.created_at(), created.created_at());
        let stored = repo.find_by_user(&user("cust-1")).await.unwrap().unwrap();
        assert_eq!(stored.full_name(), "Tan Ah Beng");
    }

    #[tokio::test]
    async fn invalid_phone_is_rejected() {
        let handler = UpsertProfileHandler::new(Arc::new(InMemoryProfileRepository::new()));
        let err = handler
            .handle(UpsertProfileCommand { details: details("Tan", "12345") }, customer("cust-1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
