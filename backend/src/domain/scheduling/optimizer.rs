//! Location-aware slot ordering.
//!
//! Technicians work one region per stretch of the day, so a slot next to an
//! existing booking in the same region is cheaper to serve than one across
//! the island. Ranking keys, in order:
//!
//! 1. Adjacent to a same-region booking (gap of at most [`ADJACENCY_MINUTES`]).
//! 2. Position of the slot's [`DayPeriod`] in the region's preference list.
//! 3. Start time.

use serde::Serialize;

use super::{DayPeriod, OccupiedSlot, TimeSlot};
use crate::domain::region::Region;

/// Maximum gap for a slot to count as adjacent to an existing booking.
pub const ADJACENCY_MINUTES: u32 = 90;

/// A slot with the reasons it was ranked where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RankedSlot {
    pub slot: TimeSlot,
    pub period: DayPeriod,
    pub near_existing_booking: bool,
}

/// Orders available slots for a customer in a given region.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotOptimizer;

impl SlotOptimizer {
    pub fn new() -> Self {
        Self
    }

    /// Preferred order of day periods when visiting `region`.
    pub fn period_preference(region: Region) -> [DayPeriod; 3] {
        use DayPeriod::*;
        match region {
            Region::Central => [Midday, Morning, Afternoon],
            Region::North => [Morning, Midday, Afternoon],
            Region::NorthEast => [Morning, Afternoon, Midday],
            Region::East => [Afternoon, Midday, Morning],
            Region::West => [Afternoon, Morning, Midday],
        }
    }

    /// Re-orders `slots`. The sort is stable, so equal keys keep input order.
    pub fn rank(&self, slots: Vec<TimeSlot>, region: Region, existing: &[OccupiedSlot]) -> Vec<RankedSlot> {
        let preference = Self::period_preference(region);

        let mut ranked: Vec<RankedSlot> = slots
            .into_iter()
            .map(|slot| RankedSlot {
                slot,
                period: slot.period(),
                near_existing_booking: existing.iter().any(|booked| {
                    booked.region == region
                        && slot.gap_minutes(booked.start, booked.duration_minutes) <= ADJACENCY_MINUTES
                }),
            })
            .collect();

        ranked.sort_by_key(|r| {
            let period_rank = preference.iter().position(|p| *p == r.period).unwrap_or(preference.len());
            (!r.near_existing_booking, period_rank, r.slot.start)
        });
        ranked
    }
}
