//! The booking service.
//!
//! [`HotelService`] owns the three collections (rooms, users, bookings) in
//! memory and mirrors each one into the snapshot [`Storage`] after every
//! change. Every call waits out the configured artificial latency first and
//! answers with an [`ApiResponse`] envelope; domain rejections never leave a
//! collection half-modified.
//!
//! Mutating calls take `&mut self`, so two calls can never interleave on the
//! same service.

mod bookings;
mod dashboard;
mod rooms;
mod users;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::{Config, PricingPolicy};
use crate::error::{Result, ServiceError};
use crate::model::{Booking, Room, User};
use crate::response::ApiResponse;
use crate::seed::{self, SeedData};
use crate::storage::{Storage, BOOKINGS_KEY, ROOMS_KEY, USERS_KEY};

/// In-process stand-in for a hotel booking backend.
#[derive(Debug)]
pub struct HotelService {
    rooms: Vec<Room>,
    users: Vec<User>,
    bookings: Vec<Booking>,
    storage: Storage,
    config: Config,
    rng: StdRng,
}

impl HotelService {
    /// Load the collections from `storage`, seeding a fresh store.
    ///
    /// A collection with a stored snapshot is taken as-is. When no
    /// collection is stored at all and `service.seed_on_empty` is set, the
    /// demo hotel is generated and written back so later runs see the same
    /// data. A partially populated store keeps what it has; missing
    /// collections start empty.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the store fails.
    pub fn open(config: Config, storage: Storage) -> Result<Self> {
        let mut rng = match config.service.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let rooms: Option<Vec<Room>> = storage.load(ROOMS_KEY)?;
        let users: Option<Vec<User>> = storage.load(USERS_KEY)?;
        let bookings: Option<Vec<Booking>> = storage.load(BOOKINGS_KEY)?;

        let nothing_stored = rooms.is_none() && users.is_none() && bookings.is_none();
        let data = if nothing_stored && config.service.seed_on_empty {
            info!("Snapshot store is empty, seeding demo data");
            seed::generate(&mut rng, Utc::now())
        } else {
            SeedData {
                rooms: rooms.unwrap_or_default(),
                users: users.unwrap_or_default(),
                bookings: bookings.unwrap_or_default(),
            }
        };

        let service = Self::assemble(config, storage, rng, data);
        if nothing_stored {
            service.persist_all();
        }
        debug!(
            rooms = service.rooms.len(),
            users = service.users.len(),
            bookings = service.bookings.len(),
            "Service ready"
        );
        Ok(service)
    }

    /// Build a service over explicit collections, replacing whatever the
    /// store held.
    #[must_use]
    pub fn with_data(config: Config, storage: Storage, data: SeedData) -> Self {
        let rng = match config.service.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let service = Self::assemble(config, storage, rng, data);
        service.persist_all();
        service
    }

    fn assemble(config: Config, storage: Storage, rng: StdRng, data: SeedData) -> Self {
        Self {
            rooms: data.rooms,
            users: data.users,
            bookings: data.bookings,
            storage,
            config,
            rng,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The backing snapshot store.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Wipe the store and start over from fresh demo data (or empty
    /// collections when seeding is disabled).
    pub async fn reset(&mut self) -> ApiResponse<()> {
        self.simulate_latency().await;

        if let Err(e) = self.storage.clear_all() {
            error!(error = %e, "Failed to clear snapshot store");
            return ApiResponse::fail("Reset failed", e.to_string());
        }

        let data = if self.config.service.seed_on_empty {
            seed::generate(&mut self.rng, Utc::now())
        } else {
            SeedData {
                rooms: Vec::new(),
                users: Vec::new(),
                bookings: Vec::new(),
            }
        };
        self.rooms = data.rooms;
        self.users = data.users;
        self.bookings = data.bookings;
        self.persist_all();

        info!("Store reset");
        ApiResponse::done("Store reset successfully")
    }

    async fn simulate_latency(&self) {
        let latency = self.config.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    /// A fresh id not used by any room, user or booking.
    fn next_id(&mut self) -> String {
        loop {
            let id = seed::generate_id(&mut self.rng);
            let taken = self.rooms.iter().any(|r| r.id == id)
                || self.users.iter().any(|u| u.id == id)
                || self.bookings.iter().any(|b| b.id == id);
            if !taken {
                return id;
            }
        }
    }

    /// Write one snapshot. A failed write is logged and otherwise ignored;
    /// the in-memory state stays authoritative for this process.
    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(e) = self.storage.save(key, value) {
            error!(key, error = %e, "Failed to save snapshot");
        }
    }

    fn persist_rooms(&self) {
        self.persist(ROOMS_KEY, &self.rooms);
    }

    fn persist_users(&self) {
        self.persist(USERS_KEY, &self.users);
    }

    fn persist_bookings(&self) {
        self.persist(BOOKINGS_KEY, &self.bookings);
    }

    fn persist_all(&self) {
        self.persist_rooms();
        self.persist_users();
        self.persist_bookings();
    }

    /// The total to report for `booking` under the configured pricing policy.
    fn reported_total(&self, booking: &Booking) -> u64 {
        match self.config.booking.pricing_policy {
            PricingPolicy::Frozen => booking.total_price,
            PricingPolicy::RecomputeOnRead => self
                .rooms
                .iter()
                .find(|r| r.id == booking.room_id)
                .map_or(booking.total_price, |room| {
                    u64::from(room.price) * booking.nights()
                }),
        }
    }

    /// A copy of `booking` carrying its reported total.
    fn priced(&self, booking: &Booking) -> Booking {
        let mut booking = booking.clone();
        booking.total_price = self.reported_total(&booking);
        booking
    }
}

/// Turn a domain result into an envelope, logging rejections.
fn respond<T>(
    operation: &'static str,
    result: std::result::Result<T, ServiceError>,
    message: &str,
) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::ok_with_message(data, message),
        Err(e) => {
            warn!(operation, error = %e, detail = %e.message(), "Request rejected");
            e.into()
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Small fixed hotels for service tests.

    use chrono::{Duration, NaiveDate, Utc};

    use super::HotelService;
    use crate::config::Config;
    use crate::model::{Booking, BookingStatus, Room, RoomType, User, UserRole};
    use crate::seed::SeedData;
    use crate::storage::Storage;

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    pub fn room(id: &str, name: &str, room_type: RoomType, price: u32, capacity: u32) -> Room {
        let now = Utc::now();
        Room {
            id: id.to_string(),
            name: name.to_string(),
            room_type,
            price,
            capacity,
            amenities: vec!["TV".to_string(), "WiFi".to_string()],
            images: Vec::new(),
            description: format!("{name} description"),
            availability: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn user(id: &str, email: &str, name: &str, role: UserRole) -> User {
        let now = Utc::now();
        User {
            id: id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role,
            bookings: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn booking(
        id: &str,
        room: &Room,
        user_id: &str,
        check_in: &str,
        check_out: &str,
        status: BookingStatus,
        age_days: i64,
    ) -> Booking {
        let check_in = date(check_in);
        let check_out = date(check_out);
        let nights = u64::try_from((check_out - check_in).num_days()).unwrap();
        Booking {
            id: id.to_string(),
            room_id: room.id.clone(),
            user_id: user_id.to_string(),
            check_in,
            check_out,
            guests: 1,
            total_price: u64::from(room.price) * nights,
            status,
            guest_info: None,
            created_at: Utc::now() - Duration::days(age_days),
            updated_at: Utc::now(),
        }
    }

    /// Four rooms (one unavailable), three users, two bookings on `r-double`.
    pub fn small_hotel() -> SeedData {
        let single = room("r-single", "City Single 101", RoomType::Single, 100, 1);
        let double = room("r-double", "Ocean View Double 202", RoomType::Double, 150, 2);
        let mut suite = room("r-suite", "Luxury Suite 303", RoomType::Suite, 400, 3);
        suite.amenities.push("Balcony".to_string());
        let mut closed = room("r-closed", "Royal Deluxe 404", RoomType::Deluxe, 300, 2);
        closed.availability = false;

        let mut guest = user("u-guest", "guest@example.com", "Guest User", UserRole::Guest);
        let admin = user("u-admin", "admin@hotel.com", "Hotel Administrator", UserRole::Admin);
        let other = user("u-other", "emma.brown@example.com", "Emma Brown", UserRole::Guest);

        let confirmed = booking(
            "b-confirmed",
            &double,
            "u-guest",
            "2026-07-10",
            "2026-07-13",
            BookingStatus::Confirmed,
            2,
        );
        let pending = booking(
            "b-pending",
            &double,
            "u-other",
            "2026-07-20",
            "2026-07-22",
            BookingStatus::Pending,
            1,
        );
        guest.bookings.push(confirmed.id.clone());

        SeedData {
            rooms: vec![single, double, suite, closed],
            users: vec![admin, guest, other],
            bookings: vec![confirmed, pending],
        }
    }

    pub fn service_with(config: Config, data: SeedData) -> HotelService {
        crate::logging::init_test_logging();
        HotelService::with_data(config, Storage::open_in_memory().unwrap(), data)
    }

    pub fn small_service() -> HotelService {
        service_with(Config::for_tests(), small_hotel())
    }
}
