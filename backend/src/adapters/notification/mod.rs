//! Notification adapters.

mod greeting_dispatcher;
mod tracing_sender;

pub use greeting_dispatcher::GreetingDispatcher;
pub use tracing_sender::TracingNotificationSender;
