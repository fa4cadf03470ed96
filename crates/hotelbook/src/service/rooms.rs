//! Room catalog operations.

use tracing::info;

use super::{respond, HotelService};
use crate::catalog::name_order;
use crate::error::ServiceError;
use crate::model::{NewRoom, Room, RoomFilters, RoomUpdate};
use crate::response::ApiResponse;

impl HotelService {
    /// List rooms matching `filters`, sorted by name.
    pub async fn get_rooms(&self, filters: Option<&RoomFilters>) -> ApiResponse<Vec<Room>> {
        self.simulate_latency().await;

        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|room| filters.map_or(true, |f| f.matches(room)))
            .cloned()
            .collect();
        rooms.sort_by(|a, b| name_order(&a.name, &b.name));
        ApiResponse::ok(rooms)
    }

    /// Look up a single room.
    pub async fn get_room_by_id(&self, id: &str) -> ApiResponse<Room> {
        self.simulate_latency().await;
        respond("get_room_by_id", self.find_room(id).cloned(), "Room found")
    }

    /// Add a room to the catalog.
    pub async fn create_room(&mut self, new: NewRoom) -> ApiResponse<Room> {
        self.simulate_latency().await;

        let id = self.next_id();
        let room = Room::from_new(id, new, Self::now());
        self.rooms.push(room.clone());
        self.persist_rooms();

        info!(room_id = %room.id, name = %room.name, "Room created");
        ApiResponse::ok_with_message(room, "Room created successfully")
    }

    /// Merge `update` into an existing room.
    pub async fn update_room(&mut self, id: &str, update: RoomUpdate) -> ApiResponse<Room> {
        self.simulate_latency().await;

        let result = match self.rooms.iter_mut().find(|r| r.id == id) {
            Some(room) => {
                room.apply(update, Self::now());
                Ok(room.clone())
            }
            None => Err(ServiceError::RoomNotFound { id: id.to_string() }),
        };
        if result.is_ok() {
            self.persist_rooms();
            info!(room_id = id, "Room updated");
        }
        respond("update_room", result, "Room updated successfully")
    }

    /// Remove a room that no confirmed booking references.
    pub async fn delete_room(&mut self, id: &str) -> ApiResponse<()> {
        self.simulate_latency().await;

        let result = self.try_delete_room(id);
        if result.is_ok() {
            self.persist_rooms();
            info!(room_id = id, "Room deleted");
        }
        respond("delete_room", result, "Room deleted successfully")
    }

    fn try_delete_room(&mut self, id: &str) -> Result<(), ServiceError> {
        let index = self
            .rooms
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ServiceError::RoomNotFound { id: id.to_string() })?;

        let active = self
            .bookings
            .iter()
            .filter(|b| b.room_id == id && b.is_confirmed())
            .count();
        if active > 0 {
            return Err(ServiceError::RoomHasActiveBookings {
                room_id: id.to_string(),
                count: active,
            });
        }

        self.rooms.remove(index);
        Ok(())
    }

    pub(super) fn find_room(&self, id: &str) -> Result<&Room, ServiceError> {
        self.rooms
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ServiceError::RoomNotFound { id: id.to_string() })
    }
}
