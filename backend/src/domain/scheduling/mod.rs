//! Scheduling module - business hours, slot generation, daily caps and
//! location-aware slot ranking.
//!
//! Everything here is pure and synchronous. Callers load the day's occupying
//! bookings as [`OccupiedSlot`]s and pass them in.

mod capacity;
mod generator;
mod hours;
mod optimizer;
mod slot;

pub use capacity::{CapacityError, DailyCapacity, DEFAULT_MAX_AMC_PER_DAY, DEFAULT_MAX_PER_DAY};
pub use generator::{SlotGenerator, SlotRejection};
pub use hours::BusinessHours;
pub use optimizer::{RankedSlot, SlotOptimizer, ADJACENCY_MINUTES};
pub use slot::{DayPeriod, OccupiedSlot, TimeSlot};
