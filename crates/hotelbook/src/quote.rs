//! Price breakdown shown on the booking form.
//!
//! The quote is informational. The stored booking total is the room charge
//! alone (`price * nights`); fees and tax are never persisted.

use serde::{Deserialize, Serialize};

/// Service fee, percent of the room charge.
pub const SERVICE_FEE_PERCENT: u64 = 15;
/// Cleaning fee per night.
pub const CLEANING_FEE_PER_NIGHT: u64 = 25;
/// Tax, percent of room charge plus fees.
pub const TAX_PERCENT: u64 = 8;

/// Itemized stay price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Room price per night.
    pub nightly_price: u32,
    /// Length of the stay.
    pub nights: u64,
    /// `nightly_price * nights`.
    pub room_charge: u64,
    /// 15% of the room charge.
    pub service_fee: u64,
    /// 25 per night.
    pub cleaning_fee: u64,
    /// 8% of everything above.
    pub tax: u64,
    /// Amount due.
    pub total: u64,
}

/// `value * percent / 100`, rounded half up.
fn percent_of(value: u64, percent: u64) -> u64 {
    (value * percent + 50) / 100
}

impl PriceQuote {
    /// Itemize a stay of `nights` at `nightly_price`.
    #[must_use]
    pub fn new(nightly_price: u32, nights: u64) -> Self {
        let room_charge = u64::from(nightly_price) * nights;
        let service_fee = percent_of(room_charge, SERVICE_FEE_PERCENT);
        let cleaning_fee = CLEANING_FEE_PER_NIGHT * nights;
        let tax = percent_of(room_charge + service_fee + cleaning_fee, TAX_PERCENT);
        Self {
            nightly_price,
            nights,
            room_charge,
            service_fee,
            cleaning_fee,
            tax,
            total: room_charge + service_fee + cleaning_fee + tax,
        }
    }
}

impl std::fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Room ({} nights):  ${}", self.nights, self.room_charge)?;
        writeln!(f, "Service fee (15%): ${}", self.service_fee)?;
        writeln!(f, "Cleaning fee:      ${}", self.cleaning_fee)?;
        writeln!(f, "Tax (8%):          ${}", self.tax)?;
        write!(f, "Total:             ${}", self.total)
    }
}
