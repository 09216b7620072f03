//! Catalog module - bookable services and their categories.

mod category;
mod service;

pub use category::{ServiceCategory, EXTENDED_SLOT_MINUTES, STANDARD_SLOT_MINUTES};
pub use service::{Service, MAX_DURATION_MINUTES, MAX_TITLE_LENGTH, MIN_DURATION_MINUTES};
