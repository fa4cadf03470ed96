//! Rooms and the catalog filter.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    /// One bed, one guest.
    Single,
    /// Queen bed, two guests.
    Double,
    /// Separate living area.
    Suite,
    /// Premium room with views.
    Deluxe,
}

impl RoomType {
    /// All room types, in catalog order.
    pub const ALL: [RoomType; 4] = [Self::Single, Self::Double, Self::Suite, Self::Deluxe];
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Double => write!(f, "double"),
            Self::Suite => write!(f, "suite"),
            Self::Deluxe => write!(f, "deluxe"),
        }
    }
}

impl FromStr for RoomType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "suite" => Ok(Self::Suite),
            "deluxe" => Ok(Self::Deluxe),
            _ => Err(ParseEnumError::new("room type", s)),
        }
    }
}

/// A bookable hotel unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier.
    pub id: String,
    /// Display name, e.g. "Ocean View Double 214".
    pub name: String,
    /// Category.
    pub room_type: RoomType,
    /// Nightly price in whole currency units.
    pub price: u32,
    /// Maximum number of guests.
    pub capacity: u32,
    /// Amenity names, sorted.
    pub amenities: Vec<String>,
    /// Image URLs.
    pub images: Vec<String>,
    /// Marketing description.
    pub description: String,
    /// Whether the room can be booked at all.
    pub availability: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Build a room from admin input, stamping id and timestamps.
    #[must_use]
    pub fn from_new(id: String, new: NewRoom, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            room_type: new.room_type,
            price: new.price,
            capacity: new.capacity,
            amenities: new.amenities,
            images: new.images,
            description: new.description,
            availability: new.availability,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update into this room and bump `updated_at`.
    pub fn apply(&mut self, update: RoomUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(room_type) = update.room_type {
            self.room_type = room_type;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(capacity) = update.capacity {
            self.capacity = capacity;
        }
        if let Some(amenities) = update.amenities {
            self.amenities = amenities;
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(availability) = update.availability {
            self.availability = availability;
        }
        self.updated_at = now;
    }

    /// Check whether this room lists the given amenity (exact match).
    #[must_use]
    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.iter().any(|a| a == amenity)
    }
}

/// Fields supplied when an admin creates a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRoom {
    /// Display name.
    pub name: String,
    /// Category.
    pub room_type: RoomType,
    /// Nightly price.
    pub price: u32,
    /// Maximum guests.
    pub capacity: u32,
    /// Amenity names.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Whether the room is bookable.
    pub availability: bool,
}

/// A partial room update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New category.
    pub room_type: Option<RoomType>,
    /// New nightly price.
    pub price: Option<u32>,
    /// New guest limit.
    pub capacity: Option<u32>,
    /// Replacement amenity list.
    pub amenities: Option<Vec<String>>,
    /// Replacement image list.
    pub images: Option<Vec<String>>,
    /// New description.
    pub description: Option<String>,
    /// Open or close the room for booking.
    pub availability: Option<bool>,
}

impl RoomUpdate {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Catalog filter. Every present predicate must hold for a room to match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomFilters {
    /// Exact category.
    pub room_type: Option<RoomType>,
    /// Inclusive lower price bound.
    pub min_price: Option<u32>,
    /// Inclusive upper price bound.
    pub max_price: Option<u32>,
    /// Capacity floor.
    pub capacity: Option<u32>,
    /// Exact availability flag.
    pub availability: Option<bool>,
    /// Amenities that must all be present.
    pub amenities: Vec<String>,
    /// Case-insensitive substring over name, description and amenities.
    pub search_term: Option<String>,
}

impl RoomFilters {
    /// Check a room against every predicate in this filter.
    #[must_use]
    pub fn matches(&self, room: &Room) -> bool {
        if self.room_type.is_some_and(|t| t != room.room_type) {
            return false;
        }
        if self.min_price.is_some_and(|min| room.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| room.price > max) {
            return false;
        }
        if self.capacity.is_some_and(|cap| room.capacity < cap) {
            return false;
        }
        if self.availability.is_some_and(|a| a != room.availability) {
            return false;
        }
        if !self.amenities.iter().all(|a| room.has_amenity(a)) {
            return false;
        }
        match self.search_term.as_deref() {
            // An empty search term is treated as absent.
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                room.name.to_lowercase().contains(&term)
                    || room.description.to_lowercase().contains(&term)
                    || room
                        .amenities
                        .iter()
                        .any(|a| a.to_lowercase().contains(&term))
            }
        }
    }
}
