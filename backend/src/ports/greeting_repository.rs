//! Holiday greeting repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, GreetingId, Timestamp};
use crate::domain::notification::HolidayGreeting;

#[async_trait]
pub trait GreetingRepository: Send + Sync {
    async fn save(&self, greeting: &HolidayGreeting) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `GreetingNotFound` if the greeting doesn't exist
    async fn update(&self, greeting: &HolidayGreeting) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &GreetingId) -> Result<Option<HolidayGreeting>, DomainError>;

    /// All greetings ordered by send time.
    async fn list(&self) -> Result<Vec<HolidayGreeting>, DomainError>;

    /// Scheduled greetings whose send time is at or before `now`.
    async fn find_due(&self, now: &Timestamp) -> Result<Vec<HolidayGreeting>, DomainError>;
}
