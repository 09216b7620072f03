//! Payment session repository port.

use async_trait::async_trait;

use crate::domain::foundation::{BookingId, DomainError, PaymentSessionId};
use crate::domain::payment::PaymentSession;

#[async_trait]
pub trait PaymentSessionRepository: Send + Sync {
    async fn save(&self, session: &PaymentSession) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `PaymentSessionNotFound` if the session doesn't exist
    async fn update(&self, session: &PaymentSession) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &PaymentSessionId) -> Result<Option<PaymentSession>, DomainError>;

    /// Lookup by the provider's checkout session id (cs_...).
    async fn find_by_provider_session_id(
        &self,
        provider_session_id: &str,
    ) -> Result<Option<PaymentSession>, DomainError>;

    /// Sessions created for a booking, newest first.
    async fn find_by_booking(&self, booking_id: &BookingId) -> Result<Vec<PaymentSession>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_session_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PaymentSessionRepository) {}
    }
}
