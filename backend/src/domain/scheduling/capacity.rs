//! Per-day booking caps.

use thiserror::Error;

use super::OccupiedSlot;

/// Maximum occupying bookings per day.
pub const DEFAULT_MAX_PER_DAY: usize = 6;

/// Maximum occupying AMC bookings per day.
pub const DEFAULT_MAX_AMC_PER_DAY: usize = 3;

/// Why a day cannot take another booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapacityError {
    #[error("Daily booking limit of {0} reached")]
    DayFull(usize),

    #[error("Daily AMC booking limit of {0} reached")]
    AmcLimitReached(usize),
}

/// Daily caps applied before slots are offered or a booking is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCapacity {
    pub max_per_day: usize,
    pub max_amc_per_day: usize,
}

impl DailyCapacity {
    pub fn new(max_per_day: usize, max_amc_per_day: usize) -> Self {
        Self {
            max_per_day,
            max_amc_per_day,
        }
    }

    /// Checks whether one more booking fits on a day holding `existing`.
    pub fn check(&self, existing: &[OccupiedSlot], is_amc: bool) -> Result<(), CapacityError> {
        if existing.len() >= self.max_per_day {
            return Err(CapacityError::DayFull(self.max_per_day));
        }
        if is_amc && amc_count(existing) >= self.max_amc_per_day {
            return Err(CapacityError::AmcLimitReached(self.max_amc_per_day));
        }
        Ok(())
    }

    /// Bookings still accepted for the day (AMC requests see the tighter cap).
    pub fn remaining(&self, existing: &[OccupiedSlot], is_amc: bool) -> usize {
        let total = self.max_per_day.saturating_sub(existing.len());
        if is_amc {
            total.min(self.max_amc_per_day.saturating_sub(amc_count(existing)))
        } else {
            total
        }
    }
}

impl Default for DailyCapacity {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PER_DAY, DEFAULT_MAX_AMC_PER_DAY)
    }
}

fn amc_count(existing: &[OccupiedSlot]) -> usize {
    existing.iter().filter(|slot| slot.is_amc).count()
}
