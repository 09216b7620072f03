//! Stub checkout provider.
//!
//! Issues Stripe-shaped checkout sessions without calling Stripe. Used for
//! local development and tests; supports error injection and call tracking.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::ports::{CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider};

/// Seconds a hosted checkout session stays payable.
pub const CHECKOUT_SESSION_TTL_SECS: i64 = 30 * 60;

/// # Example
///
/// ```ignore
/// let provider = StubCheckoutProvider::new("https://checkout.stripe.test/pay");
/// provider.fail_next(PaymentError::network("connection reset"));
/// ```
#[derive(Clone)]
pub struct StubCheckoutProvider {
    checkout_base_url: String,
    inner: Arc<Mutex<StubState>>,
}

#[derive(Default)]
struct StubState {
    next_error: Option<PaymentError>,
    requests: Vec<CreateCheckoutRequest>,
}

impl StubCheckoutProvider {
    pub fn new(checkout_base_url: impl Into<String>) -> Self {
        Self {
            checkout_base_url: checkout_base_url.into().trim_end_matches('/').to_string(),
            inner: Arc::new(Mutex::new(StubState::default())),
        }
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<CreateCheckoutRequest> {
        self.state().requests.clone()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PaymentProvider for StubCheckoutProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let mut state = self.state();
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }
        if request.amount_cents <= 0 {
            return Err(PaymentError::invalid_request("amount must be positive"));
        }

        let id = format!("cs_test_{}", Uuid::new_v4().simple());
        let session = CheckoutSession {
            url: format!("{}/{}", self.checkout_base_url, id),
            id,
            expires_at: Utc::now().timestamp() + CHECKOUT_SESSION_TTL_SECS,
        };
        tracing::debug!(
            booking_id = %request.booking_id,
            provider_session_id = %session.id,
            "stub checkout session created"
        );
        state.requests.push(request);
        Ok(session)
    }
}

impl std::fmt::Debug for StubCheckoutProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubCheckoutProvider")
            .field("checkout_base_url", &self.checkout_base_url)
            .finish_non_exhaustive()
    }
}
