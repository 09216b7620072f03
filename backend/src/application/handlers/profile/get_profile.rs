//! GetProfileHandler - Query handler for the caller's profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::profile::Profile;
use crate::ports::ProfileRepository;

#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

pub struct GetProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl GetProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<Profile, DomainError> {
        self.profiles.find_by_user(&query.user_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("No profile for user {}", query.user_id),
            )
        })
    }
}
