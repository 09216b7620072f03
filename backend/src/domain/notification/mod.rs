//! Notification module - message templates, holiday greetings and
//! appointment reminders.
//!
//! Delivery itself happens behind the `NotificationSender` port.

mod greeting;
mod reminder;
mod template;

pub use greeting::{GreetingStatus, HolidayGreeting, GREETING_PLACEHOLDERS, MAX_HOLIDAY_NAME_LENGTH};
pub use reminder::{Reminder, ReminderKind, ReminderSchedule};
pub use template::{MessageTemplate, TemplateError, MAX_TEMPLATE_LENGTH};
