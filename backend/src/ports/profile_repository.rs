//! Profile repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::Profile;

/// Repository port for customer profiles. One row per user.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find the profile of a user.
    ///
    /// Returns `None` if the user has not created one yet.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// Insert or replace the profile keyed by its user id.
    async fn upsert(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Profiles that opted in to marketing messages.
    async fn find_marketing_recipients(&self) -> Result<Vec<Profile>, DomainError>;
}
