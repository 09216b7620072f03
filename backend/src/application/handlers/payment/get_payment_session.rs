//! GetPaymentSessionHandler - Query handler for checkout status.

use std::sync::Arc;

use crate::application::handlers::ensure_access;
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, PaymentSessionId};
use crate::domain::payment::PaymentSession;
use crate::ports::PaymentSessionRepository;

#[derive(Debug, Clone)]
pub struct GetPaymentSessionQuery {
    pub session_id: PaymentSessionId,
}

pub struct GetPaymentSessionHandler {
    sessions: Arc<dyn PaymentSessionRepository>,
}

impl GetPaymentSessionHandler {
    pub fn new(sessions: Arc<dyn PaymentSessionRepository>) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        query: GetPaymentSessionQuery,
        metadata: &CommandMetadata,
    ) -> Result<PaymentSession, DomainError> {
        let session = self
            .sessions
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::PaymentSessionNotFound,
                    format!("Payment session {} not found", query.session_id),
                )
            })?;
        ensure_access(&session, metadata)?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPaymentSessionRepository;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::BookingId;

    #[tokio::test]
    async fn only_owner_sees_session() {
        let repo = Arc::new(InMemoryPaymentSessionRepository::new());
        let session =
            PaymentSession::new(BookingId::new(), user("cust-1"), 8000, "sgd", "cs_test_1", None).unwrap();
        repo.save(&session).await.unwrap();
        let handler = GetPaymentSessionHandler::new(repo);
        let query = GetPaymentSessionQuery { session_id: *session.id() };

        assert!(handler.handle(query.clone(), &customer("cust-1")).await.is_ok());
        let err = handler.handle(query, &customer("cust-2")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }
}
