//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

use crate::catalog::RoomSort;
use crate::model::{BookingStatus, RoomFilters, RoomType, RoomUpdate, UserRole, UserUpdate};

/// Room catalog commands.
#[derive(Debug, Subcommand)]
pub enum RoomsCommand {
    /// Browse the catalog
    List(RoomListCommand),

    /// Show one room
    Show {
        /// Room id
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Add a room (admin)
    Create(RoomCreateCommand),

    /// Change a room (admin)
    Update(RoomUpdateCommand),

    /// Remove a room with no confirmed bookings (admin)
    Delete {
        /// Room id
        id: String,
    },
}

/// Catalog filters, sorting and paging.
#[derive(Debug, Args)]
pub struct RoomListCommand {
    /// Only rooms of this type
    #[arg(short = 't', long = "type", value_enum)]
    pub room_type: Option<RoomTypeArg>,

    /// Minimum nightly price
    #[arg(long)]
    pub min_price: Option<u32>,

    /// Maximum nightly price
    #[arg(long)]
    pub max_price: Option<u32>,

    /// Rooms that fit at least this many guests
    #[arg(long)]
    pub capacity: Option<u32>,

    /// Only bookable rooms
    #[arg(long, conflicts_with = "unavailable")]
    pub available: bool,

    /// Only rooms closed for booking
    #[arg(long)]
    pub unavailable: bool,

    /// Required amenity (repeatable)
    #[arg(short, long = "amenity")]
    pub amenities: Vec<String>,

    /// Text to look for in name, description and amenities
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order
    #[arg(long, value_enum, default_value = "name")]
    pub sort: SortArg,

    /// Page number, starting at 1
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Rooms per page (defaults to `catalog.page_size`)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl RoomListCommand {
    /// The catalog filter these flags describe.
    #[must_use]
    pub fn filters(&self) -> RoomFilters {
        let availability = if self.available {
            Some(true)
        } else if self.unavailable {
            Some(false)
        } else {
            None
        };
        RoomFilters {
            room_type: self.room_type.map(Into::into),
            min_price: self.min_price,
            max_price: self.max_price,
            capacity: self.capacity,
            availability,
            amenities: self.amenities.clone(),
            search_term: self.search.clone(),
        }
    }
}

/// New room fields.
#[derive(Debug, Args)]
pub struct RoomCreateCommand {
    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Room type
    #[arg(short = 't', long = "type", value_enum)]
    pub room_type: RoomTypeArg,

    /// Nightly price
    #[arg(short, long)]
    pub price: u32,

    /// Maximum guests
    #[arg(long)]
    pub capacity: u32,

    /// Amenity (repeatable)
    #[arg(short, long = "amenity")]
    pub amenities: Vec<String>,

    /// Image URL (repeatable)
    #[arg(long = "image")]
    pub images: Vec<String>,

    /// Description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Create the room closed for booking
    #[arg(long)]
    pub unavailable: bool,
}

/// Room fields to change; omitted flags keep their value.
#[derive(Debug, Args)]
pub struct RoomUpdateCommand {
    /// Room id
    pub id: String,

    /// New display name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New room type
    #[arg(short = 't', long = "type", value_enum)]
    pub room_type: Option<RoomTypeArg>,

    /// New nightly price
    #[arg(short, long)]
    pub price: Option<u32>,

    /// New maximum guests
    #[arg(long)]
    pub capacity: Option<u32>,

    /// Replace amenities (repeatable)
    #[arg(short, long = "amenity")]
    pub amenities: Option<Vec<String>>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Open (true) or close (false) the room for booking
    #[arg(long)]
    pub available: Option<bool>,
}

impl RoomUpdateCommand {
    /// The partial update these flags describe.
    #[must_use]
    pub fn update(&self) -> RoomUpdate {
        RoomUpdate {
            name: self.name.clone(),
            room_type: self.room_type.map(Into::into),
            price: self.price,
            capacity: self.capacity,
            amenities: self.amenities.clone(),
            images: None,
            description: self.description.clone(),
            availability: self.available,
        }
    }
}

/// Booking commands.
#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    /// List bookings (all of them needs admin)
    List {
        /// Only my bookings
        #[arg(short, long)]
        mine: bool,

        /// Only bookings with this status
        #[arg(short, long, value_enum)]
        status: Option<StatusArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one booking (owner or admin)
    Show {
        /// Booking id
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Book a room
    Create(BookingCreateCommand),

    /// Price breakdown for a stay, without booking
    Quote(StayArgs),

    /// Confirm a booking (admin)
    Confirm {
        /// Booking id
        id: String,
    },

    /// Cancel a booking (owner or admin)
    Cancel {
        /// Booking id
        id: String,
    },
}

/// Room and dates of a stay.
#[derive(Debug, Args)]
pub struct StayArgs {
    /// Room id
    pub room_id: String,

    /// First night (YYYY-MM-DD)
    #[arg(long)]
    pub check_in: NaiveDate,

    /// Departure day (YYYY-MM-DD)
    #[arg(long)]
    pub check_out: NaiveDate,
}

/// The booking form.
#[derive(Debug, Args)]
pub struct BookingCreateCommand {
    /// Room and dates
    #[command(flatten)]
    pub stay: StayArgs,

    /// Number of guests
    #[arg(short, long, default_value = "1")]
    pub guests: u32,

    /// Guest first name
    #[arg(long)]
    pub first_name: String,

    /// Guest last name
    #[arg(long)]
    pub last_name: String,

    /// Contact email
    #[arg(long)]
    pub email: String,

    /// Contact phone
    #[arg(long)]
    pub phone: String,

    /// Special requests
    #[arg(long)]
    pub requests: Option<String>,
}

/// User administration commands.
#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List users (admin)
    List {
        /// Only users with this role
        #[arg(short, long, value_enum)]
        role: Option<RoleArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one user (self or admin)
    Show {
        /// User id
        id: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Create a guest account
    Register {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Full name
        #[arg(short, long)]
        name: String,
    },

    /// Change a user (admin)
    Update {
        /// User id
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New email
        #[arg(short, long)]
        email: Option<String>,

        /// New role
        #[arg(short, long, value_enum)]
        role: Option<RoleArg>,
    },

    /// Remove a user; their bookings are kept (admin)
    Delete {
        /// User id
        id: String,
    },
}

impl UsersCommand {
    /// The user edit described by an `update` invocation.
    #[must_use]
    pub fn user_update(&self) -> Option<UserUpdate> {
        match self {
            Self::Update {
                name, email, role, ..
            } => Some(UserUpdate {
                name: name.clone(),
                email: email.clone(),
                role: role.map(Into::into),
            }),
            _ => None,
        }
    }
}

/// Snapshot store commands.
#[derive(Debug, Subcommand)]
pub enum StoreCommand {
    /// Show what the store holds
    Status {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Wipe the store and reseed demo data
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Room type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoomTypeArg {
    /// Single room
    Single,
    /// Double room
    Double,
    /// Suite
    Suite,
    /// Deluxe room
    Deluxe,
}

impl From<RoomTypeArg> for RoomType {
    fn from(arg: RoomTypeArg) -> Self {
        match arg {
            RoomTypeArg::Single => Self::Single,
            RoomTypeArg::Double => Self::Double,
            RoomTypeArg::Suite => Self::Suite,
            RoomTypeArg::Deluxe => Self::Deluxe,
        }
    }
}

/// Booking status argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Awaiting confirmation
    Pending,
    /// Confirmed
    Confirmed,
    /// Cancelled
    Cancelled,
}

impl From<StatusArg> for BookingStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Pending => Self::Pending,
            StatusArg::Confirmed => Self::Confirmed,
            StatusArg::Cancelled => Self::Cancelled,
        }
    }
}

/// User role argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Hotel guest
    Guest,
    /// Administrator
    Admin,
}

impl From<RoleArg> for UserRole {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Guest => Self::Guest,
            RoleArg::Admin => Self::Admin,
        }
    }
}

/// Room list sort argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// By name
    Name,
    /// Cheapest first
    Price,
}

impl From<SortArg> for RoomSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => Self::Name,
            SortArg::Price => Self::Price,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}
