//! Payment command and query handlers.

mod create_payment_session;
mod get_payment_session;
mod handle_payment_webhook;

pub use create_payment_session::{
    CheckoutSettings, CreatePaymentSessionCommand, CreatePaymentSessionHandler,
};
pub use get_payment_session::{GetPaymentSessionHandler, GetPaymentSessionQuery};
pub use handle_payment_webhook::{HandlePaymentWebhookCommand, HandlePaymentWebhookHandler};
