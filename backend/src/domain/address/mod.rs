//! Address module - customer service locations.

mod aggregate;
mod postal_code;

pub use aggregate::{Address, MAX_LABEL_LENGTH, MAX_STREET_LENGTH};
pub use postal_code::{PostalCode, UnitNumber};
