//! Core entity types for the hotel booking system.

mod booking;
mod dashboard;
mod room;
mod user;

pub use booking::{dates_overlap, Booking, BookingRequest, BookingStatus, GuestInfo};
pub use dashboard::{occupancy_rate, DashboardStats};
pub use room::{NewRoom, Room, RoomFilters, RoomType, RoomUpdate};
pub use user::{Credentials, User, UserRole, UserUpdate};

/// Error returned when parsing one of the model enums from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
