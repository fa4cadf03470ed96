//! Access gates for the command-line front end.
//!
//! Booking requires a logged-in user; back-office commands require an admin.

use crate::error::ServiceError;
use crate::model::User;
use crate::service::HotelService;

/// The logged-in user.
///
/// # Errors
///
/// Returns [`ServiceError::Unauthenticated`] when no one is logged in.
pub fn require_user(service: &HotelService) -> Result<User, ServiceError> {
    service
        .get_current_user()
        .data
        .flatten()
        .ok_or(ServiceError::Unauthenticated)
}

/// The logged-in user, who must be an admin.
///
/// # Errors
///
/// Returns [`ServiceError::Unauthenticated`] when no one is logged in and
/// [`ServiceError::Forbidden`] for a non-admin.
pub fn require_admin(service: &HotelService) -> Result<User, ServiceError> {
    let user = require_user(service)?;
    if user.is_admin() {
        Ok(user)
    } else {
        Err(ServiceError::Forbidden)
    }
}
