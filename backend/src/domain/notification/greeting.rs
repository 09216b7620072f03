//! HolidayGreeting aggregate - a broadcast message scheduled for a holiday.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::MessageTemplate;
use crate::domain::foundation::{
    DomainError, ErrorCode, GreetingId, StateMachine, Timestamp, ValidationError,
};

/// Placeholders a greeting template may use.
pub const GREETING_PLACEHOLDERS: &[&str] = &["name", "first_name", "holiday", "date"];

/// Maximum length for the holiday name.
pub const MAX_HOLIDAY_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreetingStatus {
    Scheduled,
    Sent,
    Cancelled,
}

impl GreetingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GreetingStatus::Scheduled => "scheduled",
            GreetingStatus::Sent => "sent",
            GreetingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for GreetingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GreetingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(GreetingStatus::Scheduled),
            "sent" => Ok(GreetingStatus::Sent),
            "cancelled" => Ok(GreetingStatus::Cancelled),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown greeting status '{}'", other),
            )),
        }
    }
}

impl StateMachine for GreetingStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use GreetingStatus::*;
        matches!((self, target), (Scheduled, Sent) | (Scheduled, Cancelled))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use GreetingStatus::*;
        match self {
            Scheduled => vec![Sent, Cancelled],
            Sent | Cancelled => vec![],
        }
    }
}

/// A greeting sent once to every customer who opted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayGreeting {
    id: GreetingId,
    holiday_name: String,
    holiday_date: NaiveDate,
    send_at: Timestamp,
    template: MessageTemplate,
    status: GreetingStatus,
    sent_count: u32,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl HolidayGreeting {
    /// Schedules a greeting. `send_at` must not be after the holiday itself.
    pub fn new(
        holiday_name: impl Into<String>,
        holiday_date: NaiveDate,
        send_at: Timestamp,
        template: &str,
    ) -> Result<Self, DomainError> {
        let holiday_name = holiday_name.into().trim().to_string();
        if holiday_name.is_empty() {
            return Err(ValidationError::empty_field("holiday_name").into());
        }
        if holiday_name.chars().count() > MAX_HOLIDAY_NAME_LENGTH {
            return Err(ValidationError::out_of_range(
                "holiday_name",
                1,
                MAX_HOLIDAY_NAME_LENGTH as i64,
                holiday_name.chars().count() as i64,
            )
            .into());
        }
        if send_at.to_sg_local().date() > holiday_date {
            return Err(DomainError::validation(
                "send_at",
                "Greeting must be sent on or before the holiday",
            ));
        }
        let template = MessageTemplate::new(template)
            .and_then(|t| t.check_placeholders(GREETING_PLACEHOLDERS).map(|_| t))
            .map_err(|e| DomainError::validation("template", e.to_string()))?;

        let now = Timestamp::now();
        Ok(Self {
            id: GreetingId::new(),
            holiday_name,
            holiday_date,
            send_at,
            template,
            status: GreetingStatus::Scheduled,
            sent_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a greeting from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: GreetingId,
        holiday_name: String,
        holiday_date: NaiveDate,
        send_at: Timestamp,
        template: MessageTemplate,
        status: GreetingStatus,
        sent_count: u32,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            holiday_name,
            holiday_date,
            send_at,
            template,
            status,
            sent_count,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &GreetingId {
        &self.id
    }

    pub fn holiday_name(&self) -> &str {
        &self.holiday_name
    }

    pub fn holiday_date(&self) -> NaiveDate {
        self.holiday_date
    }

    pub fn send_at(&self) -> &Timestamp {
        &self.send_at
    }

    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    pub fn status(&self) -> GreetingStatus {
        self.status
    }

    pub fn sent_count(&self) -> u32 {
        self.sent_count
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Scheduled and `send_at` has passed.
    pub fn is_due(&self, now: &Timestamp) -> bool {
        self.status == GreetingStatus::Scheduled && !self.send_at.is_after(now)
    }

    /// Renders the message for one recipient.
    pub fn render_for(&self, full_name: &str) -> Result<String, DomainError> {
        let first_name = full_name.split_whitespace().next().unwrap_or(full_name);
        let vars: HashMap<String, String> = [
            ("name", full_name.to_string()),
            ("first_name", first_name.to_string()),
            ("holiday", self.holiday_name.clone()),
            ("date", self.holiday_date.format("%-d %B %Y").to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        self.template
            .render(&vars)
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))
    }

    pub fn mark_sent(&mut self, recipients: u32) -> Result<(), DomainError> {
        self.transition_to(GreetingStatus::Sent)?;
        self.sent_count = recipients;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.transition_to(GreetingStatus::Cancelled)
    }

    fn transition_to(&mut self, target: GreetingStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition greeting from {} to {}", self.status, target),
            )
        })?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn new_year() -> NaiveDate {
        NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()
    }

    fn eve_9am() -> Timestamp {
        Timestamp::from_sg_local(
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        )
    }

    fn greeting() -> HolidayGreeting {
        HolidayGreeting::new("New Year", new_year(), eve_9am(), "Hi {{first_name}}, happy {{holiday}}!")
            .unwrap()
    }

    #[test]
    fn renders_per_recipient() {
        assert_eq!(greeting().render_for("Siti Rahman").unwrap(), "Hi Siti, happy New Year!");
    }

    #[test]
    fn renders_date_placeholder() {
        let g = HolidayGreeting::new("New Year", new_year(), eve_9am(), "See you on {{ date }}").unwrap();
        assert_eq!(g.render_for("Siti").unwrap(), "See you on 1 January 2027");
    }

    #[test]
    fn rejects_unknown_placeholder() {
        let err = HolidayGreeting::new("New Year", new_year(), eve_9am(), "Use {{promo}}").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("template"));
    }

    #[test]
    fn rejects_send_after_holiday() {
        let late = eve_9am().plus_days(2);
        assert!(HolidayGreeting::new("New Year", new_year(), late, "Hi").is_err());
    }

    #[test]
    fn due_only_when_scheduled_and_time_passed() {
        let mut g = greeting();
        assert!(!g.is_due(&eve_9am().plus_minutes(-1)));
        assert!(g.is_due(&eve_9am()));
        g.mark_sent(12).unwrap();
        assert_eq!(g.sent_count(), 12);
        assert!(!g.is_due(&eve_9am().plus_days(1)));
    }

    #[test]
    fn sent_greeting_cannot_be_cancelled() {
        let mut g = greeting();
        g.mark_sent(1).unwrap();
        assert_eq!(g.cancel().unwrap_err().code, ErrorCode::InvalidStateTransition);
    }
}
