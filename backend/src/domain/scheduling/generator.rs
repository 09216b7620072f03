//! Slot generation and booking-time slot validation.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

use super::hours::{from_minutes, minutes_of_day};
use super::{BusinessHours, CapacityError, DailyCapacity, OccupiedSlot, TimeSlot};
use crate::domain::catalog::ServiceCategory;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Why a requested slot cannot be booked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotRejection {
    #[error("No appointments on {0}")]
    Closed(NaiveDate),

    #[error("{0} is not an offered start time")]
    NotOffered(NaiveTime),

    #[error("Slot starts in the past or inside the booking lead time")]
    TooSoon,

    #[error("Slot overlaps an existing booking")]
    Taken,

    #[error(transparent)]
    Capacity(#[from] CapacityError),
}

impl From<SlotRejection> for DomainError {
    fn from(err: SlotRejection) -> Self {
        match &err {
            SlotRejection::Closed(_) => DomainError::validation("date", err.to_string()),
            SlotRejection::NotOffered(_) | SlotRejection::TooSoon => {
                DomainError::validation("start_time", err.to_string())
            }
            SlotRejection::Taken => DomainError::new(ErrorCode::SlotUnavailable, err.to_string()),
            SlotRejection::Capacity(cap) => DomainError::new(ErrorCode::SlotUnavailable, err.to_string())
                .with_detail(
                    "reason",
                    match cap {
                        CapacityError::DayFull(_) => "day_full",
                        CapacityError::AmcLimitReached(_) => "amc_limit",
                    },
                ),
        }
    }
}

/// Produces the bookable slots for a date.
#[derive(Debug, Clone, Default)]
pub struct SlotGenerator {
    hours: BusinessHours,
    capacity: DailyCapacity,
    lead_time_minutes: i64,
}

impl SlotGenerator {
    pub fn new(hours: BusinessHours, capacity: DailyCapacity) -> Self {
        Self {
            hours,
            capacity,
            lead_time_minutes: 0,
        }
    }

    /// Slots starting sooner than `minutes` from now are not offered.
    pub fn with_lead_time(mut self, minutes: i64) -> Self {
        self.lead_time_minutes = minutes.max(0);
        self
    }

    pub fn hours(&self) -> &BusinessHours {
        &self.hours
    }

    pub fn capacity(&self) -> &DailyCapacity {
        &self.capacity
    }

    /// Every slot of `category` length that fits inside the day's opening window.
    pub fn generate(&self, date: NaiveDate, category: ServiceCategory) -> Vec<TimeSlot> {
        let Some((open, close)) = self.hours.window_for(date) else {
            return Vec::new();
        };
        let interval = category.slot_interval_minutes();
        let close = minutes_of_day(close);

        let mut slots = Vec::new();
        let mut start = minutes_of_day(open);
        while start + interval <= close {
            slots.push(TimeSlot::new(date, from_minutes(start), interval));
            start += interval;
        }
        slots
    }

    /// Generated slots minus those that are taken, too soon, or blocked by the daily caps.
    ///
    /// `existing` holds the occupying bookings for `date`; `now` is Singapore local time.
    pub fn available(
        &self,
        date: NaiveDate,
        category: ServiceCategory,
        existing: &[OccupiedSlot],
        now: NaiveDateTime,
    ) -> Vec<TimeSlot> {
        if self.capacity.check(existing, category.is_amc()).is_err() {
            return Vec::new();
        }
        let cutoff = now + Duration::minutes(self.lead_time_minutes);

        self.generate(date, category)
            .into_iter()
            .filter(|slot| date.and_time(slot.start) >= cutoff)
            .filter(|slot| {
                !existing
                    .iter()
                    .any(|booked| slot.overlaps(booked.start, booked.duration_minutes))
            })
            .collect()
    }

    /// Checks a requested start time against hours, lead time, overlaps and caps.
    pub fn validate(
        &self,
        date: NaiveDate,
        start: NaiveTime,
        category: ServiceCategory,
        existing: &[OccupiedSlot],
        now: NaiveDateTime,
    ) -> Result<TimeSlot, SlotRejection> {
        if !self.hours.is_open(date) {
            return Err(SlotRejection::Closed(date));
        }
        let slot = self
            .generate(date, category)
            .into_iter()
            .find(|slot| slot.start == start)
            .ok_or(SlotRejection::NotOffered(start))?;

        if date.and_time(slot.start) < now + Duration::minutes(self.lead_time_minutes) {
            return Err(SlotRejection::TooSoon);
        }
        self.capacity.check(existing, category.is_amc())?;
        if existing
            .iter()
            .any(|booked| slot.overlaps(booked.start, booked.duration_minutes))
        {
            return Err(SlotRejection::Taken);
        }
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::region::Region;
    use crate::domain::scheduling::hours::hm;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 23).unwrap()
    }

    fn long_ago() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap().and_time(hm(0, 0))
    }

    fn booked(h: u32, m: u32, minutes: u32, is_amc: bool) -> OccupiedSlot {
        OccupiedSlot {
            start: hm(h, m),
            duration_minutes: minutes,
            is_amc,
            region: Region::Central,
        }
    }

    #[test]
    fn hourly_slots_on_a_weekday() {
        let slots = SlotGenerator::default().generate(monday(), ServiceCategory::GeneralServicing);
        let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
        assert_eq!(
            starts,
            vec![hm(9, 30), hm(10, 30), hm(11, 30), hm(12, 30), hm(13, 30), hm(14, 30), hm(15, 30)]
        );
    }

    #[test]
    fn amc_slots_are_ninety_minutes() {
        let slots = SlotGenerator::default().generate(monday(), ServiceCategory::Amc);
        let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
        assert_eq!(starts, vec![hm(9, 30), hm(11, 0), hm(12, 30), hm(14, 0), hm(15, 30)]);
        assert!(slots.iter().all(|s| s.duration_minutes == 90));
    }

    #[test]
    fn friday_drops_the_last_long_slot() {
        let slots = SlotGenerator::default().generate(friday(), ServiceCategory::Amc);
        assert_eq!(slots.len(), 4);
        assert_eq!(slots.last().unwrap().end(), hm(15, 30));
    }

    #[test]
    fn closed_day_has_no_slots() {
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
        assert!(SlotGenerator::default().generate(sunday, ServiceCategory::Repair).is_empty());
    }

    #[test]
    fn available_removes_overlapping_slots() {
        let existing = [booked(10, 0, 60, false)];
        let slots = SlotGenerator::default().available(
            monday(),
            ServiceCategory::GeneralServicing,
            &existing,
            long_ago(),
        );
        let starts: Vec<_> = slots.iter().map(|s| s.start).collect();
        assert!(!starts.contains(&hm(9, 30)));
        assert!(!starts.contains(&hm(10, 30)));
        assert!(starts.contains(&hm(11, 30)));
    }

    #[test]
    fn available_respects_lead_time() {
        let generator = SlotGenerator::default().with_lead_time(120);
        let now = monday().and_time(hm(9, 0));
        let slots = generator.available(monday(), ServiceCategory::GeneralServicing, &[], now);
        assert_eq!(slots.first().unwrap().start, hm(11, 30));
    }

    #[test]
    fn full_day_offers_nothing() {
        let existing: Vec<_> = (0..6).map(|i| booked(9 + i, 30, 60, false)).collect();
        let slots = SlotGenerator::default().available(
            monday(),
            ServiceCategory::GeneralServicing,
            &existing,
            long_ago(),
        );
        assert!(slots.is_empty());
    }

    #[test]
    fn amc_cap_blocks_only_amc() {
        let existing = [booked(9, 30, 90, true), booked(11, 0, 90, true), booked(12, 30, 90, true)];
        let generator = SlotGenerator::default();
        assert!(generator
            .available(monday(), ServiceCategory::Amc, &existing, long_ago())
            .is_empty());
        assert!(!generator
            .available(monday(), ServiceCategory::GeneralServicing, &existing, long_ago())
            .is_empty());
    }

    #[test]
    fn validate_rejects_unaligned_start() {
        let err = SlotGenerator::default()
            .validate(monday(), hm(10, 0), ServiceCategory::GeneralServicing, &[], long_ago())
            .unwrap_err();
        assert_eq!(err, SlotRejection::NotOffered(hm(10, 0)));
    }

    #[test]
    fn validate_rejects_taken_slot() {
        let existing = [booked(9, 30, 60, false)];
        let err = SlotGenerator::default()
            .validate(monday(), hm(9, 30), ServiceCategory::Repair, &existing, long_ago())
            .unwrap_err();
        assert_eq!(err, SlotRejection::Taken);
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::SlotUnavailable);
    }

    #[test]
    fn validate_rejects_past_slot() {
        let now = monday().and_time(hm(12, 0));
        let err = SlotGenerator::default()
            .validate(monday(), hm(9, 30), ServiceCategory::Repair, &[], now)
            .unwrap_err();
        assert_eq!(err, SlotRejection::TooSoon);
    }

    #[test]
    fn validate_rejects_closed_day() {
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
        let err = SlotGenerator::default()
            .validate(sunday, hm(9, 30), ServiceCategory::Repair, &[], long_ago())
            .unwrap_err();
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn validate_accepts_free_slot() {
        let slot = SlotGenerator::default()
            .validate(monday(), hm(14, 0), ServiceCategory::Amc, &[], long_ago())
            .unwrap();
        assert_eq!(slot.end(), hm(15, 30));
    }
}
