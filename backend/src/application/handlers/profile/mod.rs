//! Profile command and query handlers.

mod get_profile;
mod upsert_profile;

pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use upsert_profile::{UpsertProfileCommand, UpsertProfileHandler};
