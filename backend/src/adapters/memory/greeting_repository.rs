//! In-memory greeting repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, GreetingId, Timestamp};
use crate::domain::notification::HolidayGreeting;
use crate::ports::GreetingRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryGreetingRepository {
    greetings: Arc<RwLock<HashMap<GreetingId, HolidayGreeting>>>,
}

impl InMemoryGreetingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GreetingRepository for InMemoryGreetingRepository {
    async fn save(&self, greeting: &HolidayGreeting) -> Result<(), DomainError> {
        self.greetings
            .write()
            .await
            .insert(*greeting.id(), greeting.clone());
        Ok(())
    }

    async fn update(&self, greeting: &HolidayGreeting) -> Result<(), DomainError> {
        let mut greetings = self.greetings.write().await;
        let slot = greetings.get_mut(greeting.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::GreetingNotFound,
                format!("Greeting {} not found", greeting.id()),
            )
        })?;
        *slot = greeting.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &GreetingId) -> Result<Option<HolidayGreeting>, DomainError> {
        Ok(self.greetings.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<HolidayGreeting>, DomainError> {
        let mut all: Vec<HolidayGreeting> = self.greetings.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.send_at().cmp(b.send_at()));
        Ok(all)
    }

    async fn find_due(&self, now: &Timestamp) -> Result<Vec<HolidayGreeting>, DomainError> {
        let mut due: Vec<HolidayGreeting> = self
            .greetings
            .read()
            .await
            .values()
            .filter(|g| g.is_due(now))
            .cloned()
            .collect();
        due.sort_by(|a, b| a.send_at().cmp(b.send_at()));
        Ok(due)
    }
}
