//! ListGreetingsHandler - Query handler for the admin greeting list.

use std::sync::Arc;

use crate::application::handlers::ensure_admin;
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::notification::HolidayGreeting;
use crate::ports::GreetingRepository;

pub struct ListGreetingsHandler {
    greetings: Arc<dyn GreetingRepository>,
}

impl ListGreetingsHandler {
    pub fn new(greetings: Arc<dyn GreetingRepository>) -> Self {
        Self { greetings }
    }

    /// Every greeting, earliest `send_at` first.
    pub async fn handle(&self, metadata: &CommandMetadata) -> Result<Vec<HolidayGreeting>, DomainError> {
        ensure_admin(metadata)?;
        self.greetings.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGreetingRepository;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn customers_cannot_list_greetings() {
        let handler = ListGreetingsHandler::new(Arc::new(InMemoryGreetingRepository::new()));

        assert!(handler.handle(&admin("ops-1")).await.unwrap().is_empty());
        let err = handler.handle(&customer("cust-1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
