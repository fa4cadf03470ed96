//! Plain-text rendering for command output.

use std::fmt::Write;

use crate::catalog::Page;
use crate::model::{Booking, DashboardStats, Room, User};
use crate::storage::StorageStats;

/// Room list as a table with a paging footer.
#[must_use]
pub fn room_table(page: &Page<Room>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<28} {:<7} {:>6} {:>4}  {}",
        "ID", "NAME", "TYPE", "PRICE", "CAP", "STATUS"
    );
    for room in &page.items {
        let _ = writeln!(
            out,
            "{:<10} {:<28} {:<7} {:>6} {:>4}  {}",
            room.id,
            truncate(&room.name, 28),
            room.room_type,
            format!("${}", room.price),
            room.capacity,
            if room.availability { "available" } else { "closed" }
        );
    }
    let _ = write!(
        out,
        "Page {} of {} ({} rooms)",
        page.page,
        page.total_pages(),
        page.total
    );
    out
}

/// One line per room, for `--format plain`.
#[must_use]
pub fn room_lines(rooms: &[Room]) -> String {
    rooms
        .iter()
        .map(|r| format!("{}\t{}\t{}\t{}", r.id, r.name, r.room_type, r.price))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full room description.
#[must_use]
pub fn room_detail(room: &Room) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", room.name);
    let _ = writeln!(out, "{}", "=".repeat(room.name.chars().count()));
    let _ = writeln!(out, "ID:          {}", room.id);
    let _ = writeln!(out, "Type:        {}", room.room_type);
    let _ = writeln!(out, "Price:       ${} / night", room.price);
    let _ = writeln!(out, "Capacity:    {} guests", room.capacity);
    let _ = writeln!(
        out,
        "Available:   {}",
        if room.availability { "yes" } else { "no" }
    );
    let _ = writeln!(out, "Amenities:   {}", room.amenities.join(", "));
    let _ = writeln!(out);
    let _ = write!(out, "{}", room.description);
    out
}

/// Booking list as a table.
#[must_use]
pub fn booking_table(bookings: &[Booking]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<10} {:<10} {:<10} {:>6} {:>8}  {}",
        "ID", "ROOM", "CHECK-IN", "CHECK-OUT", "GUESTS", "TOTAL", "STATUS"
    );
    for b in bookings {
        let _ = writeln!(
            out,
            "{:<10} {:<10} {:<10} {:<10} {:>6} {:>8}  {}",
            b.id,
            b.room_id,
            b.check_in,
            b.check_out,
            b.guests,
            format!("${}", b.total_price),
            b.status
        );
    }
    let _ = write!(out, "{} bookings", bookings.len());
    out
}

/// One line per booking, for `--format plain`.
#[must_use]
pub fn booking_lines(bookings: &[Booking]) -> String {
    bookings
        .iter()
        .map(|b| {
            format!(
                "{}\t{}\t{}..{}\t{}",
                b.id, b.room_id, b.check_in, b.check_out, b.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full booking description.
#[must_use]
pub fn booking_detail(booking: &Booking) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Booking {}", booking.id);
    let _ = writeln!(out, "Status:      {}", booking.status);
    let _ = writeln!(out, "Room:        {}", booking.room_id);
    let _ = writeln!(
        out,
        "Stay:        {} to {} ({} nights)",
        booking.check_in,
        booking.check_out,
        booking.nights()
    );
    let _ = writeln!(out, "Guests:      {}", booking.guests);
    let _ = write!(out, "Total:       ${}", booking.total_price);
    if let Some(guest) = &booking.guest_info {
        let _ = write!(
            out,
            "\nContact:     {} <{}> {}",
            guest.full_name(),
            guest.email,
            guest.phone
        );
        if let Some(requests) = &guest.special_requests {
            let _ = write!(out, "\nRequests:    {requests}");
        }
    }
    out
}

/// User list as a table.
#[must_use]
pub fn user_table(users: &[User]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10} {:<24} {:<32} {:<6} {:>8}",
        "ID", "NAME", "EMAIL", "ROLE", "BOOKINGS"
    );
    for u in users {
        let _ = writeln!(
            out,
            "{:<10} {:<24} {:<32} {:<6} {:>8}",
            u.id,
            truncate(&u.name, 24),
            truncate(&u.email, 32),
            u.role,
            u.bookings.len()
        );
    }
    let _ = write!(out, "{} users", users.len());
    out
}

/// One line per user, for `--format plain`.
#[must_use]
pub fn user_lines(users: &[User]) -> String {
    users
        .iter()
        .map(|u| format!("{}\t{}\t{}\t{}", u.id, u.email, u.name, u.role))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A user's profile.
#[must_use]
pub fn user_detail(user: &User) -> String {
    format!(
        "{} <{}>\nID:          {}\nRole:        {}\nBookings:    {}",
        user.name,
        user.email,
        user.id,
        user.role,
        user.bookings.len()
    )
}

/// Back-office summary.
#[must_use]
pub fn dashboard(stats: &DashboardStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dashboard");
    let _ = writeln!(out, "---------");
    let _ = writeln!(
        out,
        "Rooms:       {} total, {} available, {} occupied",
        stats.total_rooms, stats.available_rooms, stats.occupied_rooms
    );
    let _ = writeln!(out, "Occupancy:   {:.1}%", stats.occupancy_rate);
    let _ = writeln!(
        out,
        "Bookings:    {} total, {} pending, {} confirmed",
        stats.total_bookings, stats.pending_bookings, stats.confirmed_bookings
    );
    let _ = write!(out, "Revenue:     ${}", stats.total_revenue);
    out
}

/// Snapshot store summary.
#[must_use]
pub fn store_status(location: &str, stats: &StorageStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "hotelbook store");
    let _ = writeln!(out, "---------------");
    let _ = writeln!(out, "Location:    {location}");
    let _ = writeln!(out, "Snapshots:   {}", stats.snapshot_count);
    let _ = writeln!(out, "Payload:     {} bytes", stats.payload_bytes);
    let _ = writeln!(out, "File size:   {} bytes", stats.db_size_bytes);
    let _ = write!(
        out,
        "Last write:  {}",
        stats
            .last_write
            .map_or_else(|| "never".to_string(), |t| t.to_rfc3339())
    );
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
