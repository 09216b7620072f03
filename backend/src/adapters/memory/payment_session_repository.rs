//! In-memory payment session repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{BookingId, DomainError, ErrorCode, PaymentSessionId};
use crate::domain::payment::PaymentSession;
use crate::ports::PaymentSessionRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentSessionRepository {
    sessions: Arc<RwLock<HashMap<PaymentSessionId, PaymentSession>>>,
}

impl InMemoryPaymentSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentSessionRepository for InMemoryPaymentSessionRepository {
    async fn save(&self, session: &PaymentSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let duplicate_provider_id = sessions
            .values()
            .any(|s| s.provider_session_id() == session.provider_session_id());
        if duplicate_provider_id {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                "Provider session already recorded",
            ));
        }
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &PaymentSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(session.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::PaymentSessionNotFound,
                format!("Payment session {} not found", session.id()),
            )
        })?;
        *slot = session.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &PaymentSessionId) -> Result<Option<PaymentSession>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn find_by_provider_session_id(
        &self,
        provider_session_id: &str,
    ) -> Result<Option<PaymentSession>, DomainError> {
        Ok(self
            .sessions
            .read()
            .await
            .values()
            .find(|s| s.provider_session_id() == provider_session_id)
            .cloned())
    }

    async fn find_by_booking(&self, booking_id: &BookingId) -> Result<Vec<PaymentSession>, DomainError> {
        let mut found: Vec<PaymentSession> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.booking_id() == booking_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(found)
    }
}
