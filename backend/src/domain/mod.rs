//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `region` - Address and postal code to region classification
//! - `scheduling` - Business hours, slot generation, daily caps, slot ranking
//! - `catalog` - Bookable services
//! - `booking` - Appointments and their lifecycle
//! - `address` - Customer service locations
//! - `profile` - Customer contact details and preferences
//! - `payment` - Checkout sessions and Stripe webhooks
//! - `notification` - Templates, holiday greetings, reminders

pub mod address;
pub mod booking;
pub mod catalog;
pub mod foundation;
pub mod notification;
pub mod payment;
pub mod profile;
pub mod region;
pub mod scheduling;
