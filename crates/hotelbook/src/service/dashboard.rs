//! Back-office dashboard.

use std::collections::HashSet;

use super::HotelService;
use crate::model::{occupancy_rate, BookingStatus, DashboardStats};
use crate::response::ApiResponse;

impl HotelService {
    /// Aggregate figures over the current rooms and bookings.
    pub async fn get_dashboard_stats(&self) -> ApiResponse<DashboardStats> {
        self.simulate_latency().await;

        let total_rooms = self.rooms.len();
        let occupied: HashSet<&str> = self
            .bookings
            .iter()
            .filter(|b| b.is_confirmed())
            .map(|b| b.room_id.as_str())
            .filter(|id| self.rooms.iter().any(|r| r.id == *id))
            .collect();
        let occupied_rooms = occupied.len();

        let count = |status: BookingStatus| {
            self.bookings
                .iter()
                .filter(|b| b.status == status)
                .count()
        };
        let total_revenue = self
            .bookings
            .iter()
            .filter(|b| b.is_confirmed())
            .map(|b| self.reported_total(b))
            .sum();

        ApiResponse::ok(DashboardStats {
            total_rooms,
            occupied_rooms,
            available_rooms: self.rooms.iter().filter(|r| r.availability).count(),
            total_bookings: self.bookings.len(),
            pending_bookings: count(BookingStatus::Pending),
            confirmed_bookings: count(BookingStatus::Confirmed),
            total_revenue,
            occupancy_rate: occupancy_rate(occupied_rooms, total_rooms),
        })
    }
}
