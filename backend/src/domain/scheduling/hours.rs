//! Business hours and closed days.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use std::collections::BTreeSet;

/// Weekly opening window plus one-off closures (public holidays).
///
/// All times are Singapore local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessHours {
    open: NaiveTime,
    close: NaiveTime,
    friday_close: NaiveTime,
    closed_weekdays: Vec<Weekday>,
    closed_dates: BTreeSet<NaiveDate>,
}

impl BusinessHours {
    /// Mon-Sat 09:30-17:00, Friday until 16:30, Sunday closed.
    pub fn standard() -> Self {
        Self {
            open: hm(9, 30),
            close: hm(17, 0),
            friday_close: hm(16, 30),
            closed_weekdays: vec![Weekday::Sun],
            closed_dates: BTreeSet::new(),
        }
    }

    /// Overrides the opening window. Friday closes at `friday_close`.
    pub fn with_window(mut self, open: NaiveTime, close: NaiveTime, friday_close: NaiveTime) -> Self {
        self.open = open;
        self.close = close;
        self.friday_close = friday_close;
        self
    }

    /// Adds dates on which no appointments are taken.
    pub fn with_closed_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.closed_dates.extend(dates);
        self
    }

    pub fn closed_dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.closed_dates.iter()
    }

    /// Returns true if appointments can be taken on `date`.
    pub fn is_open(&self, date: NaiveDate) -> bool {
        !self.closed_weekdays.contains(&date.weekday()) && !self.closed_dates.contains(&date)
    }

    /// Opening and closing time for `date`, or `None` when closed.
    pub fn window_for(&self, date: NaiveDate) -> Option<(NaiveTime, NaiveTime)> {
        if !self.is_open(date) {
            return None;
        }
        let close = if date.weekday() == Weekday::Fri {
            self.friday_close
        } else {
            self.close
        };
        Some((self.open, close))
    }

    /// Returns true if `[start, start + minutes)` fits inside the window for `date`.
    pub fn contains(&self, date: NaiveDate, start: NaiveTime, minutes: u32) -> bool {
        let Some((open, close)) = self.window_for(date) else {
            return false;
        };
        let end_minutes = minutes_of_day(start) + minutes;
        start >= open && end_minutes <= minutes_of_day(close)
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self::standard()
    }
}

pub(crate) fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

pub(crate) fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

pub(crate) fn from_minutes(minutes: u32) -> NaiveTime {
    hm(minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sunday_is_closed() {
        // 2026-10-18 is a Sunday.
        assert!(!BusinessHours::standard().is_open(date(2026, 10, 18)));
        assert!(BusinessHours::standard().window_for(date(2026, 10, 18)).is_none());
    }

    #[test]
    fn friday_closes_early() {
        let hours = BusinessHours::standard();
        let (open, close) = hours.window_for(date(2026, 10, 16)).unwrap();
        assert_eq!(open, hm(9, 30));
        assert_eq!(close, hm(16, 30));
    }

    #[test]
    fn weekday_window() {
        let (open, close) = BusinessHours::standard().window_for(date(2026, 10, 19)).unwrap();
        assert_eq!(open, hm(9, 30));
        assert_eq!(close, hm(17, 0));
    }

    #[test]
    fn closed_dates_are_honoured() {
        let holiday = date(2026, 12, 25);
        let hours = BusinessHours::standard().with_closed_dates([holiday]);
        assert!(!hours.is_open(holiday));
        assert!(hours.is_open(date(2026, 12, 24)));
    }

    #[test]
    fn contains_checks_both_ends() {
        let hours = BusinessHours::standard();
        let monday = date(2026, 10, 19);
        assert!(hours.contains(monday, hm(9, 30), 60));
        assert!(hours.contains(monday, hm(16, 0), 60));
        assert!(!hours.contains(monday, hm(16, 30), 60));
        assert!(!hours.contains(monday, hm(9, 0), 60));
    }
}
