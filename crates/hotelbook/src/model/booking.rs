//! Bookings and the booking request submitted by the guest form.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ParseEnumError;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created, awaiting confirmation.
    Pending,
    /// Confirmed; blocks the room for its dates.
    Confirmed,
    /// Cancelled by the guest or an admin.
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(ParseEnumError::new("booking status", s)),
        }
    }
}

/// Contact details entered on the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInfo {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Free-form notes for the front desk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl GuestInfo {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// What the booking form submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Room being booked.
    pub room_id: String,
    /// First night.
    pub check_in: NaiveDate,
    /// Departure day (not a night of the stay).
    pub check_out: NaiveDate,
    /// Number of guests.
    pub guests: u32,
    /// Contact details.
    pub guest_info: GuestInfo,
}

impl BookingRequest {
    /// Number of nights requested; zero or negative when the dates are inverted.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

/// A reservation of a room over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier.
    pub id: String,
    /// Booked room.
    pub room_id: String,
    /// Owning user.
    pub user_id: String,
    /// First night.
    pub check_in: NaiveDate,
    /// Departure day.
    pub check_out: NaiveDate,
    /// Number of guests.
    pub guests: u32,
    /// Nightly price times nights, captured when the booking was made.
    pub total_price: u64,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Contact details from the booking form, if one was submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_info: Option<GuestInfo>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Number of nights in the stay.
    #[must_use]
    pub fn nights(&self) -> u64 {
        u64::try_from((self.check_out - self.check_in).num_days()).unwrap_or(0)
    }

    /// Whether this booking blocks its room.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Whether this booking's stay overlaps `[check_in, check_out)`.
    #[must_use]
    pub fn overlaps(&self, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        dates_overlap(check_in, check_out, self.check_in, self.check_out)
    }
}

/// Half-open interval overlap: `[in_a, out_a)` and `[in_b, out_b)` share a night.
///
/// A stay that checks out on the day another checks in does not overlap it.
#[must_use]
pub fn dates_overlap(
    in_a: NaiveDate,
    out_a: NaiveDate,
    in_b: NaiveDate,
    out_b: NaiveDate,
) -> bool {
    in_a < out_b && out_a > in_b
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_status_display_and_parse() {
        for s in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(s.to_string().parse::<BookingStatus>().unwrap(), s);
        }
        assert_eq!(
            "canceled".parse::<BookingStatus>().unwrap(),
            BookingStatus::Cancelled
        );
        assert!("archived".parse::<BookingStatus>().is_err());
    }

    #[test]
    fn test_overlap_cases() {
        let (a_in, a_out) = (date("2026-03-10"), date("2026-03-15"));

        // Inside, straddling either end, and enclosing.
        assert!(dates_overlap(a_in, a_out, date("2026-03-11"), date("2026-03-12")));
        assert!(dates_overlap(a_in, a_out, date("2026-03-08"), date("2026-03-11")));
        assert!(dates_overlap(a_in, a_out, date("2026-03-14"), date("2026-03-20")));
        assert!(dates_overlap(a_in, a_out, date("2026-03-01"), date("2026-03-31")));

        // Back to back is fine.
        assert!(!dates_overlap(a_in, a_out, date("2026-03-15"), date("2026-03-18")));
        assert!(!dates_overlap(a_in, a_out, date("2026-03-05"), date("2026-03-10")));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = (date("2026-01-01"), date("2026-01-04"));
        let b = (date("2026-01-03"), date("2026-01-06"));
        assert_eq!(
            dates_overlap(a.0, a.1, b.0, b.1),
            dates_overlap(b.0, b.1, a.0, a.1)
        );
    }

    #[test]
    fn test_request_nights() {
        let req = BookingRequest {
            room_id: "r1".to_string(),
            check_in: date("2026-05-01"),
            check_out: date("2026-05-04"),
            guests: 2,
            guest_info: GuestInfo::default(),
        };
        assert_eq!(req.nights(), 3);
    }

    #[test]
    fn test_guest_full_name_trims() {
        let info = GuestInfo {
            first_name: " Ada ".to_string(),
            last_name: "Lovelace".to_string(),
            ..Default::default()
        };
        assert_eq!(info.full_name(), "Ada Lovelace");
    }
}
