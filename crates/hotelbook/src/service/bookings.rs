//! Booking operations.
//!
//! Only confirmed bookings block a room. Pending and cancelled bookings
//! never cause a conflict, so two guests may both hold a pending booking for
//! the same nights; whichever is confirmed first wins on the next request.

use tracing::{debug, info};

use super::{respond, HotelService};
use crate::error::ServiceError;
use crate::model::{Booking, BookingRequest, BookingStatus};
use crate::response::ApiResponse;
use crate::validation::validate_stay;

impl HotelService {
    /// List bookings, newest first, optionally only those of `user_id`.
    pub async fn get_bookings(&self, user_id: Option<&str>) -> ApiResponse<Vec<Booking>> {
        self.simulate_latency().await;

        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| user_id.map_or(true, |uid| b.user_id == uid))
            .map(|b| self.priced(b))
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        ApiResponse::ok(bookings)
    }

    /// Look up a single booking.
    pub async fn get_booking_by_id(&self, id: &str) -> ApiResponse<Booking> {
        self.simulate_latency().await;
        let result = self.find_booking(id).map(|b| self.priced(b));
        respond("get_booking_by_id", result, "Booking found")
    }

    /// Reserve a room for `user_id`.
    ///
    /// The new booking starts out pending with the room charge
    /// (`nights * price`) as its total.
    pub async fn create_booking(
        &mut self,
        user_id: &str,
        request: BookingRequest,
    ) -> ApiResponse<Booking> {
        self.simulate_latency().await;
        let result = self.try_create_booking(user_id, request);
        respond("create_booking", result, "Booking created successfully")
    }

    fn try_create_booking(
        &mut self,
        user_id: &str,
        request: BookingRequest,
    ) -> Result<Booking, ServiceError> {
        validate_stay(&request).map_err(|errors| ServiceError::InvalidBooking {
            reason: errors.to_string(),
        })?;

        let room = self.find_room(&request.room_id)?;
        if !room.availability {
            return Err(ServiceError::RoomUnavailable {
                room_id: room.id.clone(),
            });
        }
        if let Some(conflict) = self.bookings.iter().find(|b| {
            b.room_id == request.room_id
                && b.is_confirmed()
                && b.overlaps(request.check_in, request.check_out)
        }) {
            return Err(ServiceError::RoomAlreadyBooked {
                room_id: request.room_id.clone(),
                conflicting_booking: conflict.id.clone(),
            });
        }
        let price = room.price;

        let now = Self::now();
        let id = self.next_id();
        let nights = u64::try_from(request.nights()).unwrap_or(0);
        let booking = Booking {
            id,
            room_id: request.room_id,
            user_id: user_id.to_string(),
            check_in: request.check_in,
            check_out: request.check_out,
            guests: request.guests,
            total_price: u64::from(price) * nights,
            status: BookingStatus::Pending,
            guest_info: Some(request.guest_info),
            created_at: now,
            updated_at: now,
        };

        self.bookings.push(booking.clone());
        self.persist_bookings();
        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
            user.bookings.push(booking.id.clone());
            user.updated_at = now;
            self.persist_users();
        } else {
            debug!(user_id, "Booking owner is not a registered user");
        }

        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            nights,
            total = booking.total_price,
            "Booking created"
        );
        Ok(booking)
    }

    /// Set a booking's status. No transition rules apply.
    pub async fn update_booking_status(
        &mut self,
        id: &str,
        status: BookingStatus,
    ) -> ApiResponse<Booking> {
        self.simulate_latency().await;

        let result = match self.bookings.iter_mut().find(|b| b.id == id) {
            Some(booking) => {
                booking.status = status;
                booking.updated_at = Self::now();
                Ok(booking.clone())
            }
            None => Err(ServiceError::BookingNotFound { id: id.to_string() }),
        };
        let result = result.map(|b| {
            self.persist_bookings();
            info!(booking_id = id, %status, "Booking status updated");
            self.priced(&b)
        });
        respond(
            "update_booking_status",
            result,
            "Booking status updated successfully",
        )
    }

    /// Mark a booking confirmed.
    pub async fn confirm_booking(&mut self, id: &str) -> ApiResponse<Booking> {
        self.update_booking_status(id, BookingStatus::Confirmed).await
    }

    /// Mark a booking cancelled.
    pub async fn cancel_booking(&mut self, id: &str) -> ApiResponse<Booking> {
        self.update_booking_status(id, BookingStatus::Cancelled).await
    }

    fn find_booking(&self, id: &str) -> Result<&Booking, ServiceError> {
        self.bookings
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| ServiceError::BookingNotFound { id: id.to_string() })
    }
}
