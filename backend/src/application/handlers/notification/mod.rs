//! Holiday greeting handlers.

mod dispatch_due_greetings;
mod list_greetings;
mod schedule_holiday_greeting;

pub use dispatch_due_greetings::{DispatchDueGreetingsHandler, DispatchReport};
pub use list_greetings::ListGreetingsHandler;
pub use schedule_holiday_greeting::{ScheduleHolidayGreetingCommand, ScheduleHolidayGreetingHandler};
