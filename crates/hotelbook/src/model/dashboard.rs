//! Back-office aggregates.

use serde::{Deserialize, Serialize};

/// Figures shown on the admin dashboard, recomputed on every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Rooms in the catalog.
    pub total_rooms: usize,
    /// Distinct rooms with at least one confirmed booking.
    pub occupied_rooms: usize,
    /// Rooms whose availability flag is on.
    pub available_rooms: usize,
    /// All bookings, any status.
    pub total_bookings: usize,
    /// Bookings awaiting confirmation.
    pub pending_bookings: usize,
    /// Confirmed bookings.
    pub confirmed_bookings: usize,
    /// Sum of confirmed booking totals.
    pub total_revenue: u64,
    /// `occupied_rooms / total_rooms * 100`, or 0 for an empty catalog.
    pub occupancy_rate: f64,
}

/// Occupancy percentage with the empty-catalog boundary handled.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn occupancy_rate(occupied_rooms: usize, total_rooms: usize) -> f64 {
    if total_rooms == 0 {
        0.0
    } else {
        occupied_rooms as f64 / total_rooms as f64 * 100.0
    }
}
