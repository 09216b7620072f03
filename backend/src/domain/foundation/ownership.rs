//! Ownership trait for customer-owned resources.
//!
//! Bookings, addresses and payment sessions each belong to exactly one
//! customer. Handlers call [`OwnedByUser::check_ownership`] before returning
//! or mutating them. A mismatch is reported as `Unauthorized`, which the HTTP
//! layer turns into a 401.

use super::{AuthenticatedUser, DomainError, ErrorCode, UserId};

/// Trait for aggregates that have a single owner.
pub trait OwnedByUser {
    /// Returns the ID of the user who owns this resource.
    fn owner_id(&self) -> &UserId;

    /// Checks if the given user is the owner.
    fn is_owner(&self, user_id: &UserId) -> bool {
        self.owner_id() == user_id
    }

    /// Validates ownership, returning an `Unauthorized` error if the user is not the owner.
    fn check_ownership(&self, user_id: &UserId) -> Result<(), DomainError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::Unauthorized,
                "You are not authorized to access this resource",
            )
            .with_detail("requested_by", user_id.to_string()))
        }
    }

    /// Like [`check_ownership`](Self::check_ownership), but admins pass unconditionally.
    fn check_access(&self, user: &AuthenticatedUser) -> Result<(), DomainError> {
        if user.is_admin() {
            return Ok(());
        }
        self.check_ownership(&user.id)
    }
}
