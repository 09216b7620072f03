//! Appointment reminder timing.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

/// Which reminder this is, relative to the appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    DayBefore,
    TwoHoursBefore,
}

impl ReminderKind {
    pub fn minutes_before(&self) -> i64 {
        match self {
            ReminderKind::DayBefore => 24 * 60,
            ReminderKind::TwoHoursBefore => 2 * 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub kind: ReminderKind,
    pub send_at: Timestamp,
}

/// Reminders still worth sending for one appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReminderSchedule {
    pub reminders: Vec<Reminder>,
}

impl ReminderSchedule {
    /// 24h and 2h reminders, minus those whose send time is already past.
    pub fn for_booking(starts_at: &Timestamp, now: &Timestamp) -> Self {
        let reminders = [ReminderKind::DayBefore, ReminderKind::TwoHoursBefore]
            .into_iter()
            .map(|kind| Reminder {
                kind,
                send_at: starts_at.plus_minutes(-kind.minutes_before()),
            })
            .filter(|reminder| !reminder.send_at.is_before(now))
            .collect();
        Self { reminders }
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_appointment_gets_both_reminders() {
        let now = Timestamp::now();
        let schedule = ReminderSchedule::for_booking(&now.plus_days(3), &now);
        assert_eq!(schedule.reminders.len(), 2);
        assert_eq!(schedule.reminders[0].kind, ReminderKind::DayBefore);
        assert_eq!(schedule.reminders[0].send_at, now.plus_days(2));
    }

    #[test]
    fn near_appointment_skips_day_before() {
        let now = Timestamp::now();
        let schedule = ReminderSchedule::for_booking(&now.plus_minutes(5 * 60), &now);
        assert_eq!(schedule.reminders.len(), 1);
        assert_eq!(schedule.reminders[0].kind, ReminderKind::TwoHoursBefore);
    }

    #[test]
    fn imminent_appointment_gets_none() {
        let now = Timestamp::now();
        assert!(ReminderSchedule::for_booking(&now.plus_minutes(30), &now).is_empty());
    }
}
