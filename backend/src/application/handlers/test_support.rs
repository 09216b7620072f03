//! Fixtures shared by handler tests.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

use crate::domain::address::Address;
use crate::domain::catalog::{Service, ServiceCategory};
use crate::domain::foundation::{CommandMetadata, Timestamp, UserId, UserRole};

pub fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub fn customer(id: &str) -> CommandMetadata {
    CommandMetadata::new(user(id))
}

pub fn admin(id: &str) -> CommandMetadata {
    let mut metadata = CommandMetadata::new(user(id));
    metadata.role = UserRole::Admin;
    metadata
}

pub fn service(category: ServiceCategory) -> Service {
    Service::new("General Servicing", category, 8000, 60).unwrap()
}

pub fn address(owner: &str, postal: &str) -> Address {
    Address::new(user(owner), "Home", "Blk 123 Tampines St 11", Some("#05-123".into()), postal).unwrap()
}

/// The first `weekday` at least a week from today (Singapore time).
pub fn upcoming(weekday: Weekday) -> NaiveDate {
    let mut date = Timestamp::now().to_sg_local().date() + Duration::days(7);
    while date.weekday() != weekday {
        date += Duration::days(1);
    }
    date
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}
