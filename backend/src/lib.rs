//! iAircon - Air-con servicing bookings for Singapore
//!
//! Customers pick a service, an address and a slot; the scheduler offers
//! slots inside business hours under daily caps, ranked to keep technicians
//! in one region. Payment runs through hosted checkout confirmed by
//! webhook, and admins schedule holiday greetings.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
