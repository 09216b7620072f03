//! Profile module - customer contact details and preferences.

mod aggregate;
mod contact;

pub use aggregate::{Preferences, Profile, ProfileDetails, MAX_NAME_LENGTH};
pub use contact::{ContactChannel, PhoneNumber};
