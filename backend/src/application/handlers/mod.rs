//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler owns the ports it needs as `Arc<dyn Port>` and is cheap to share
//! across requests.

pub mod address;
pub mod booking;
pub mod catalog;
pub mod geocoding;
pub mod notification;
pub mod payment;
pub mod profile;

#[cfg(test)]
pub(crate) mod test_support;

use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, OwnedByUser};

/// Owners and admins pass; everyone else gets `Unauthorized`.
pub(crate) fn ensure_access<R: OwnedByUser>(
    resource: &R,
    metadata: &CommandMetadata,
) -> Result<(), DomainError> {
    if metadata.is_admin() {
        return Ok(());
    }
    resource.check_ownership(&metadata.user_id)
}

pub(crate) fn ensure_admin(metadata: &CommandMetadata) -> Result<(), DomainError> {
    if metadata.is_admin() {
        Ok(())
    } else {
        Err(DomainError::new(
            ErrorCode::Forbidden,
            "This operation requires the admin role",
        ))
    }
}
