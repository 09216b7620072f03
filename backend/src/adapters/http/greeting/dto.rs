//! Request and response bodies for greeting endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{GreetingId, Timestamp};
use crate::domain::notification::{GreetingStatus, HolidayGreeting};

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleGreetingRequest {
    pub holiday_name: String,
    pub holiday_date: NaiveDate,
    /// RFC 3339; must be on or before the holiday.
    pub send_at: Timestamp,
    pub template: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GreetingResponse {
    pub id: GreetingId,
    pub holiday_name: String,
    pub holiday_date: NaiveDate,
    pub send_at: Timestamp,
    pub template: String,
    pub status: GreetingStatus,
    pub sent_count: u32,
    pub created_at: Timestamp,
}

impl From<HolidayGreeting> for GreetingResponse {
    fn from(greeting: HolidayGreeting) -> Self {
        Self {
            id: *greeting.id(),
            holiday_name: greeting.holiday_name().to_string(),
            holiday_date: greeting.holiday_date(),
            send_at: *greeting.send_at(),
            template: greeting.template().as_str().to_string(),
            status: greeting.status(),
            sent_count: greeting.sent_count(),
            created_at: *greeting.created_at(),
        }
    }
}
