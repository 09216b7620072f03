//! Time slots and the bookings that occupy them.

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::hours::minutes_of_day;
use crate::domain::region::Region;

/// Part of the working day used for regional preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPeriod {
    /// Before 12:00.
    Morning,
    /// 12:00 to 14:00.
    Midday,
    /// 14:00 onwards.
    Afternoon,
}

impl DayPeriod {
    pub fn of(time: NaiveTime) -> Self {
        match minutes_of_day(time) {
            m if m < 12 * 60 => DayPeriod::Morning,
            m if m < 14 * 60 => DayPeriod::Midday,
            _ => DayPeriod::Afternoon,
        }
    }
}

/// One bookable appointment window on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub duration_minutes: u32,
}

impl TimeSlot {
    pub fn new(date: NaiveDate, start: NaiveTime, duration_minutes: u32) -> Self {
        Self {
            date,
            start,
            duration_minutes,
        }
    }

    pub fn end(&self) -> NaiveTime {
        self.start + Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn period(&self) -> DayPeriod {
        DayPeriod::of(self.start)
    }

    /// Half-open interval overlap on the same date.
    pub fn overlaps(&self, start: NaiveTime, duration_minutes: u32) -> bool {
        let (a_start, a_end) = self.bounds();
        let b_start = minutes_of_day(start);
        let b_end = b_start + duration_minutes;
        a_start < b_end && b_start < a_end
    }

    /// Minutes between this slot and another interval; zero if they overlap.
    pub fn gap_minutes(&self, start: NaiveTime, duration_minutes: u32) -> u32 {
        let (a_start, a_end) = self.bounds();
        let b_start = minutes_of_day(start);
        let b_end = b_start + duration_minutes;
        if b_start >= a_end {
            b_start - a_end
        } else if a_start >= b_end {
            a_start - b_end
        } else {
            0
        }
    }

    fn bounds(&self) -> (u32, u32) {
        let start = minutes_of_day(self.start);
        (start, start + self.duration_minutes)
    }
}

/// The scheduling footprint of an existing booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupiedSlot {
    pub start: NaiveTime,
    pub duration_minutes: u32,
    pub is_amc: bool,
    pub region: Region,
}
