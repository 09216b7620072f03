//! Stripe payment provider adapter.
//!
//! Checkout creation goes through the `PaymentProvider` port. Webhook
//! verification lives in `domain::payment` since it is pure HMAC work.
//!
//! # Configuration
//!
//! - `IAIRCON__PAYMENT__WEBHOOK_SECRET`: Webhook signing secret (whsec_...)
//! - `IAIRCON__PAYMENT__CHECKOUT_BASE_URL`: Hosted page base for stub sessions

mod stub_checkout;

pub use stub_checkout::{StubCheckoutProvider, CHECKOUT_SESSION_TTL_SECS};
