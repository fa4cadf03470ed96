//! Error types for hotelbook.
//!
//! Two layers of errors live here. [`Error`] covers infrastructure failures
//! (database, configuration, directories) and is what `?` propagates inside the crate.
//! [`ServiceError`] covers domain rejections (a room that does not exist, a
//! date range that is already taken) and is what the service layer turns into
//! a failed [`ApiResponse`](crate::response::ApiResponse) envelope.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for hotelbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for hotelbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

/// Domain-level rejections reported by the booking service.
///
/// The `Display` text is the short label that ends up in the envelope's
/// `error` field; [`ServiceError::message`] is the longer sentence shown to
/// the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// No room with the requested id.
    #[error("Room not found")]
    RoomNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// No booking with the requested id.
    #[error("Booking not found")]
    BookingNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// No user with the requested id.
    #[error("User not found")]
    UserNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// The room still has at least one confirmed booking.
    #[error("Room has active bookings")]
    RoomHasActiveBookings {
        /// The room that was going to be deleted.
        room_id: String,
        /// Number of confirmed bookings referencing it.
        count: usize,
    },

    /// The room's availability flag is off.
    #[error("Room not available")]
    RoomUnavailable {
        /// The room that was requested.
        room_id: String,
    },

    /// A confirmed booking already covers part of the requested stay.
    #[error("Room already booked")]
    RoomAlreadyBooked {
        /// The room that was requested.
        room_id: String,
        /// Id of the first conflicting booking.
        conflicting_booking: String,
    },

    /// Unknown email, or the demo coin flip came up tails.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Signup with an email that is already registered.
    #[error("Email already registered")]
    EmailTaken {
        /// The duplicate email.
        email: String,
    },

    /// An email that does not look like `name@domain.tld`.
    #[error("Invalid email")]
    InvalidEmail {
        /// The rejected input.
        email: String,
    },

    /// The booking request failed form validation.
    #[error("Invalid booking request")]
    InvalidBooking {
        /// Field-level messages, joined for display.
        reason: String,
    },

    /// No one is logged in.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Logged in, but without the admin role.
    #[error("Access denied")]
    Forbidden,
}

impl ServiceError {
    /// The human-readable sentence for this rejection.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::RoomNotFound { .. } => "The requested room does not exist".to_string(),
            Self::BookingNotFound { .. } => "The requested booking does not exist".to_string(),
            Self::UserNotFound { .. } => "The requested user does not exist".to_string(),
            Self::RoomHasActiveBookings { .. } => {
                "Cannot delete room with active bookings".to_string()
            }
            Self::RoomUnavailable { .. } => {
                "The selected room is not available for booking".to_string()
            }
            Self::RoomAlreadyBooked { .. } => {
                "The room is already booked for the selected dates".to_string()
            }
            Self::InvalidCredentials => "The email or password is incorrect".to_string(),
            Self::EmailTaken { email } => format!("An account for {email} already exists"),
            Self::InvalidEmail { .. } => "Please enter a valid email".to_string(),
            Self::InvalidBooking { reason } => reason.clone(),
            Self::Unauthenticated => "Please log in to continue".to_string(),
            Self::Forbidden => "This action requires an administrator account".to_string(),
        }
    }

    /// Check if this rejection is a missing-entity lookup.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RoomNotFound { .. } | Self::BookingNotFound { .. } | Self::UserNotFound { .. }
        )
    }
}
