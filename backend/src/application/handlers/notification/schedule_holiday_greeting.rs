//! ScheduleHolidayGreetingHandler - Command handler for admin broadcasts.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::application::handlers::ensure_admin;
use crate::domain::foundation::{CommandMetadata, DomainError, Timestamp};
use crate::domain::notification::HolidayGreeting;
use crate::ports::GreetingRepository;

#[derive(Debug, Clone)]
pub struct ScheduleHolidayGreetingCommand {
    pub holiday_name: String,
    pub holiday_date: NaiveDate,
    pub send_at: Timestamp,
    /// Message body with `{{name}}`, `{{first_name}}`, `{{holiday}}` or `{{date}}`.
    pub template: String,
}

pub struct ScheduleHolidayGreetingHandler {
    greetings: Arc<dyn GreetingRepository>,
}

impl ScheduleHolidayGreetingHandler {
    pub fn new(greetings: Arc<dyn GreetingRepository>) -> Self {
        Self { greetings }
    }

    pub async fn handle(
        &self,
        cmd: ScheduleHolidayGreetingCommand,
        metadata: CommandMetadata,
    ) -> Result<HolidayGreeting, DomainError> {
        ensure_admin(&metadata)?;

        let greeting = HolidayGreeting::new(cmd.holiday_name, cmd.holiday_date, cmd.send_at, &cmd.template)?;
        self.greetings.save(&greeting).await?;

        info!(
            greeting_id = %greeting.id(),
            holiday = greeting.holiday_name(),
            send_at = %greeting.send_at(),
            scheduled_by = %metadata.user_id,
            "holiday greeting scheduled"
        );
        Ok(greeting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryGreetingRepository;
    use crate::application::handlers::test_support::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::notification::GreetingStatus;
    use chrono::Weekday;

    fn command(template: &str) -> ScheduleHolidayGreetingCommand {
        let holiday = upcoming(Weekday::Wed);
        ScheduleHolidayGreetingCommand {
            holiday_name: "Deepavali".to_string(),
            holiday_date: holiday,
            send_at: Timestamp::from_sg_local(holiday, hm(8, 0)),
            template: template.to_string(),
        }
    }

    #[tokio::test]
    async fn admin_schedules_greeting() {
        let repo = Arc::new(InMemoryGreetingRepository::new());
        let handler = ScheduleHolidayGreetingHandler::new(repo.clone());

        let greeting = handler
            .handle(command("Happy {{holiday}}, {{first_name}}!"), admin("ops-1"))
            .await
            .unwrap();

        assert_eq!(greeting.status(), GreetingStatus::Scheduled);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn customer_is_forbidden() {
        let handler = ScheduleHolidayGreetingHandler::new(Arc::new(InMemoryGreetingRepository::new()));
        let err = handler
            .handle(command("Happy {{holiday}}!"), customer("cust-1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn unknown_placeholder_is_rejected() {
        let handler = ScheduleHolidayGreetingHandler::new(Arc::new(InMemoryGreetingRepository::new()));
        let err = handler
            .handle(command("Hi {{nickname}}"), admin("ops-1"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
