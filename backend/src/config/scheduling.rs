//! Scheduling configuration: opening hours, closures, daily caps.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::scheduling::{
    BusinessHours, DailyCapacity, SlotGenerator, DEFAULT_MAX_AMC_PER_DAY, DEFAULT_MAX_PER_DAY,
};

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    #[serde(default = "default_opens_at")]
    pub opens_at: String,

    #[serde(default = "default_closes_at")]
    pub closes_at: String,

    #[serde(default = "default_friday_closes_at")]
    pub friday_closes_at: String,

    /// Public holidays and other closures, `YYYY-MM-DD`, comma-separated
    #[serde(default)]
    pub closed_dates: Option<String>,

    #[serde(default = "default_max_per_day")]
    pub max_bookings_per_day: usize,

    #[serde(default = "default_max_amc_per_day")]
    pub max_amc_per_day: usize,

    /// Minimum notice before a slot can be booked
    #[serde(default = "default_lead_time")]
    pub lead_time_minutes: i64,
}

impl SchedulingConfig {
    pub fn closed_dates_list(&self) -> Result<Vec<NaiveDate>, ValidationError> {
        let Some(raw) = &self.closed_dates else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ValidationError::InvalidValue {
                    field: "scheduling.closed_dates",
                    reason: format!("'{}' is not YYYY-MM-DD", s),
                })
            })
            .collect()
    }

    pub fn slot_generator(&self) -> Result<SlotGenerator, ValidationError> {
        let hours = BusinessHours::standard()
            .with_window(
                parse_hhmm("scheduling.opens_at", &self.opens_at)?,
                parse_hhmm("scheduling.closes_at", &self.closes_at)?,
                parse_hhmm("scheduling.friday_closes_at", &self.friday_closes_at)?,
            )
            .with_closed_dates(self.closed_dates_list()?);
        let capacity = DailyCapacity::new(self.max_bookings_per_day, self.max_amc_per_day);
        Ok(SlotGenerator::new(hours, capacity).with_lead_time(self.lead_time_minutes))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let opens = parse_hhmm("scheduling.opens_at", &self.opens_at)?;
        for (field, raw) in [
            ("scheduling.closes_at", &self.closes_at),
            ("scheduling.friday_closes_at", &self.friday_closes_at),
        ] {
            if parse_hhmm(field, raw)? <= opens {
                return Err(ValidationError::InvalidValue {
                    field,
                    reason: "must be after opening time".to_string(),
                });
            }
        }
        if self.max_bookings_per_day == 0 {
            return Err(ValidationError::InvalidValue {
                field: "scheduling.max_bookings_per_day",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_amc_per_day > self.max_bookings_per_day {
            return Err(ValidationError::InvalidValue {
                field: "scheduling.max_amc_per_day",
                reason: "cannot exceed max_bookings_per_day".to_string(),
            });
        }
        self.closed_dates_list()?;
        Ok(())
    }
}

fn parse_hhmm(field: &'static str, raw: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| ValidationError::InvalidValue {
        field,
        reason: format!("'{}' is not HH:MM", raw),
    })
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            opens_at: default_opens_at(),
            closes_at: default_closes_at(),
            friday_closes_at: default_friday_closes_at(),
            closed_dates: None,
            max_bookings_per_day: default_max_per_day(),
            max_amc_per_day: default_max_amc_per_day(),
            lead_time_minutes: default_lead_time(),
        }
    }
}

fn default_opens_at() -> String {
    "09:30".to_string()
}

fn default_closes_at() -> String {
    "17:00".to_string()
}

fn default_friday_closes_at() -> String {
    "16:30".to_string()
}

fn default_max_per_day() -> usize {
    DEFAULT_MAX_PER_DAY
}

fn default_max_amc_per_day() -> usize {
    DEFAULT_MAX_AMC_PER_DAY
}

fn default_lead_time() -> i64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_build_standard_generator() {
        let config = SchedulingConfig::default();
        assert!(config.validate().is_ok());
        let generator = config.slot_generator().unwrap();
        assert_eq!(*generator.capacity(), DailyCapacity::new(6, 3));
    }

    #[test]
    fn test_closed_dates_parsing() {
        let config = SchedulingConfig {
            closed_dates: Some("2026-12-25, 2027-01-01".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.closed_dates_list().unwrap(),
            vec![
                NaiveDate::from_ymd_opt(2026, 12, 25).unwrap(),
                NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
            ]
        );
    }

    #[test]
    fn test_bad_closed_date_rejected() {
        let config = SchedulingConfig {
            closed_dates: Some("25/12/2026".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_closing_before_opening_rejected() {
        let config = SchedulingConfig {
            closes_at: "09:00".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidValue { field: "scheduling.closes_at", .. })
        ));
    }

    #[test]
    fn test_amc_cap_cannot_exceed_day_cap() {
        let config = SchedulingConfig {
            max_bookings_per_day: 2,
            max_amc_per_day: 3,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
