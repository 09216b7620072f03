//! In-memory profile repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::Profile;
use crate::ports::ProfileRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn upsert(&self, profile: &Profile) -> Result<(), DomainError> {
        self.profiles
            .write()
            .await
            .insert(profile.user_id().clone(), profile.clone());
        Ok(())
    }

    async fn find_marketing_recipients(&self) -> Result<Vec<Profile>, DomainError> {
        let mut found: Vec<Profile> = self
            .profiles
            .read()
            .await
            .values()
            .filter(|p| p.preferences().marketing_opt_in)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.user_id().cmp(b.user_id()));
        Ok(found)
    }
}
