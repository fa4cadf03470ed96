//! Demo data for a fresh store.
//!
//! Generates a small, plausible hotel: two rooms of each category, the two
//! demo accounts plus a handful of guests, and three bookings linked back
//! into their owners' booking lists. Everything is drawn from the supplied
//! RNG so a fixed seed reproduces the same hotel.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Booking, BookingStatus, Room, RoomType, User, UserRole};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

const AMENITIES: &[&str] = &[
    "WiFi",
    "Air Conditioning",
    "TV",
    "Mini Bar",
    "Desk",
    "Safe",
    "Hair Dryer",
    "Coffee Maker",
    "Balcony",
    "City View",
    "Ocean View",
    "Kitchenette",
    "Sofa",
    "Bathtub",
    "Shower",
    "Iron",
    "Telephone",
    "Room Service",
];

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Michael", "Sarah", "David", "Emma", "Robert", "Lisa", "James", "Anna",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];

/// Email of the seeded administrator.
pub const ADMIN_EMAIL: &str = "admin@hotel.com";
/// Email of the seeded demo guest.
pub const GUEST_EMAIL: &str = "guest@example.com";

/// Generate a 9-character lowercase base-36 identifier.
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect()
}

/// Per-category generation parameters.
struct RoomProfile {
    names: [&'static str; 4],
    price: (u32, u32),
    capacity: (u32, u32),
    amenities: (usize, usize),
    images: [&'static str; 2],
    description: &'static str,
}

fn profile(room_type: RoomType) -> RoomProfile {
    match room_type {
        RoomType::Single => RoomProfile {
            names: ["Sunrise Single", "Garden View Single", "City Single", "Comfort Single"],
            price: (80, 150),
            capacity: (1, 1),
            amenities: (3, 5),
            images: [
                "https://images.unsplash.com/photo-1631049307264-da0ec9d70304?w=800&h=600&fit=crop",
                "https://images.unsplash.com/photo-1618773928121-c32242e63f39?w=800&h=600&fit=crop",
            ],
            description: "Cozy single room perfect for solo travelers. Features a comfortable \
                          single bed, modern bathroom, and essential amenities for a pleasant stay.",
        },
        RoomType::Double => RoomProfile {
            names: ["Ocean View Double", "Mountain View Double", "Premium Double", "Executive Double"],
            price: (120, 220),
            capacity: (2, 2),
            amenities: (5, 7),
            images: [
                "https://images.unsplash.com/photo-1582719478250-c87cae5fd583?w=800&h=600&fit=crop",
                "https://images.unsplash.com/photo-1611892440504-42a792e24d32?w=800&h=600&fit=crop",
            ],
            description: "Spacious double room ideal for couples. Includes a queen-size bed, \
                          private bathroom, and all necessary amenities for your comfort.",
        },
        RoomType::Suite => RoomProfile {
            names: ["Presidential Suite", "Penthouse Suite", "Executive Suite", "Luxury Suite"],
            price: (300, 600),
            capacity: (2, 3),
            amenities: (8, 12),
            images: [
                "https://images.unsplash.com/photo-1591088398332-8a7791972843?w=800&h=600&fit=crop",
                "https://images.unsplash.com/photo-1582719508461-905c673771fd?w=800&h=600&fit=crop",
            ],
            description: "Luxurious suite with separate living area. Perfect for extended stays, \
                          featuring premium amenities and extra space to relax and work.",
        },
        RoomType::Deluxe => RoomProfile {
            names: ["Royal Deluxe", "Premium Deluxe", "Executive Deluxe", "Ocean Deluxe"],
            price: (250, 450),
            capacity: (2, 3),
            amenities: (6, 10),
            images: [
                "https://images.unsplash.com/photo-1596394516093-501ba68a0ba6?w=800&h=600&fit=crop",
                "https://images.unsplash.com/photo-1542314831-068cd1dbb5ee?w=800&h=600&fit=crop",
            ],
            description: "Premium deluxe room with stunning views. Experience luxury with \
                          top-tier amenities, premium bedding, and exceptional comfort.",
        },
    }
}

/// Generate one room of the given category.
pub fn generate_room<R: Rng + ?Sized>(rng: &mut R, room_type: RoomType, now: DateTime<Utc>) -> Room {
    let p = profile(room_type);
    let number: u32 = rng.gen_range(100..=999);
    let base_name = p.names.choose(rng).copied().unwrap_or(p.names[0]);

    let mut pool: Vec<&str> = AMENITIES.to_vec();
    pool.shuffle(rng);
    let count = rng.gen_range(p.amenities.0..=p.amenities.1);
    let mut amenities: Vec<String> = pool.into_iter().take(count).map(String::from).collect();
    amenities.sort();

    Room {
        id: generate_id(rng),
        name: format!("{base_name} {number}"),
        room_type,
        price: rng.gen_range(p.price.0..=p.price.1),
        capacity: rng.gen_range(p.capacity.0..=p.capacity.1),
        amenities,
        images: p.images.iter().map(|s| (*s).to_string()).collect(),
        description: p.description.to_string(),
        availability: rng.gen_bool(0.7),
        created_at: now - Duration::days(rng.gen_range(0..365)),
        updated_at: now - Duration::days(rng.gen_range(0..30)),
    }
}

/// Generate a guest with a random name whose email is not in `taken`.
fn generate_guest<R: Rng + ?Sized>(rng: &mut R, taken: &[String], now: DateTime<Utc>) -> User {
    let mut first = "";
    let mut last = "";
    let mut email = String::new();
    for attempt in 0.. {
        first = FIRST_NAMES.choose(rng).copied().unwrap_or("John");
        last = LAST_NAMES.choose(rng).copied().unwrap_or("Smith");
        email = format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase());
        if attempt >= 20 {
            email = format!(
                "{}.{}{attempt}@example.com",
                first.to_lowercase(),
                last.to_lowercase()
            );
        }
        if !taken.contains(&email) {
            break;
        }
    }

    User {
        id: generate_id(rng),
        email,
        name: format!("{first} {last}"),
        role: UserRole::Guest,
        bookings: Vec::new(),
        created_at: now - Duration::days(rng.gen_range(0..365)),
        updated_at: now,
    }
}

fn named_user<R: Rng + ?Sized>(
    rng: &mut R,
    email: &str,
    name: &str,
    role: UserRole,
    now: DateTime<Utc>,
) -> User {
    User {
        id: generate_id(rng),
        email: email.to_string(),
        name: name.to_string(),
        role,
        bookings: Vec::new(),
        created_at: now - Duration::days(rng.gen_range(0..365)),
        updated_at: now,
    }
}

fn seed_booking<R: Rng + ?Sized>(
    rng: &mut R,
    room: &Room,
    user: &User,
    nights: i64,
    status: BookingStatus,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> Booking {
    let check_in = today + Duration::days(rng.gen_range(1..=30));
    Booking {
        id: generate_id(rng),
        room_id: room.id.clone(),
        user_id: user.id.clone(),
        check_in,
        check_out: check_in + Duration::days(nights),
        guests: rng.gen_range(1..=room.capacity.max(1)),
        total_price: u64::from(room.price) * u64::try_from(nights).unwrap_or(0),
        status,
        guest_info: None,
        created_at: now - Duration::days(rng.gen_range(0..90)),
        updated_at: now,
    }
}

/// The three initial collections.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedData {
    /// Catalog rooms.
    pub rooms: Vec<Room>,
    /// Registered users.
    pub users: Vec<User>,
    /// Existing bookings.
    pub bookings: Vec<Booking>,
}

/// Generate the demo hotel.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> SeedData {
    let today = now.date_naive();

    let rooms: Vec<Room> = RoomType::ALL
        .iter()
        .flat_map(|&t| [t, t])
        .map(|t| generate_room(rng, t, now))
        .collect();

    let mut users = vec![
        named_user(rng, ADMIN_EMAIL, "Hotel Administrator", UserRole::Admin, now),
        named_user(rng, GUEST_EMAIL, "Guest User", UserRole::Guest, now),
    ];
    for _ in 0..5 {
        let taken: Vec<String> = users.iter().map(|u| u.email.clone()).collect();
        users.push(generate_guest(rng, &taken, now));
    }

    // (room index, user index, nights, status)
    let plan = [
        (0, 1, 3, BookingStatus::Confirmed),
        (2, 2, 2, BookingStatus::Pending),
        (4, 3, 5, BookingStatus::Confirmed),
    ];
    let mut bookings = Vec::with_capacity(plan.len());
    for (room_idx, user_idx, nights, status) in plan {
        let booking = seed_booking(
            rng,
            &rooms[room_idx],
            &users[user_idx],
            nights,
            status,
            today,
            now,
        );
        users[user_idx].bookings.push(booking.id.clone());
        bookings.push(booking);
    }

    SeedData {
        rooms,
        users,
        bookings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded() -> SeedData {
        let mut rng = StdRng::seed_from_u64(42);
        generate(&mut rng, Utc::now())
    }

    #[test]
    fn test_generate_id_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let id = generate_id(&mut rng);
        assert_eq!(id.len(), 9);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_seed_counts() {
        let data = seeded();
        assert_eq!(data.rooms.len(), 8);
        assert_eq!(data.users.len(), 7);
        assert_eq!(data.bookings.len(), 3);
        for t in RoomType::ALL {
            assert_eq!(data.rooms.iter().filter(|r| r.room_type == t).count(), 2);
        }
    }

    #[test]
    fn test_seed_rooms_respect_profiles() {
        for room in seeded().rooms {
            let p = profile(room.room_type);
            assert!(room.price >= p.price.0 && room.price <= p.price.1);
            assert!(room.capacity >= p.capacity.0 && room.capacity <= p.capacity.1);
            assert!(room.amenities.len() >= p.amenities.0);
            assert!(room.amenities.len() <= p.amenities.1);
            let mut sorted = room.amenities.clone();
            sorted.sort();
            assert_eq!(sorted, room.amenities);
        }
    }

    #[test]
    fn test_seed_demo_accounts() {
        let data = seeded();
        assert_eq!(data.users[0].email, ADMIN_EMAIL);
        assert!(data.users[0].is_admin());
        assert_eq!(data.users[1].email, GUEST_EMAIL);
        assert_eq!(data.users[1].role, UserRole::Guest);
    }

    #[test]
    fn test_seed_emails_unique() {
        let data = seeded();
        let mut emails: Vec<&str> = data.users.iter().map(|u| u.email.as_str()).collect();
        emails.sort_unstable();
        emails.dedup();
        assert_eq!(emails.len(), data.users.len());
    }

    #[test]
    fn test_seed_bookings_linked_to_users() {
        let data = seeded();
        for booking in &data.bookings {
            let owner = data
                .users
                .iter()
                .find(|u| u.id == booking.user_id)
                .expect("booking owner exists");
            assert!(owner.bookings.contains(&booking.id));

            let room = data
                .rooms
                .iter()
                .find(|r| r.id == booking.room_id)
                .expect("booked room exists");
            assert_eq!(
                booking.total_price,
                u64::from(room.price) * booking.nights()
            );
            assert!(booking.check_out > booking.check_in);
        }
    }

    #[test]
    fn test_same_seed_same_hotel() {
        let now = Utc::now();
        let a = generate(&mut StdRng::seed_from_u64(9), now);
        let b = generate(&mut StdRng::seed_from_u64(9), now);
        assert_eq!(a, b);
    }
}
