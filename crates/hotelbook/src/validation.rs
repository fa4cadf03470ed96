//! Booking form validation.
//!
//! Runs before a booking request reaches the availability checks. Every
//! failing field is reported, not just the first.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::BookingRequest;

/// Same shape the booking form accepts: `something@domain.tld`, no spaces.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

/// Check whether `email` looks like an email address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

/// A single field failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: &'static str,
}

/// All field failures for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    /// True when no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message for a particular field, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Validate only the stay itself: dates and guest count.
///
/// # Errors
///
/// Returns the failing fields.
pub fn validate_stay(request: &BookingRequest) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    check_stay(request, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the full booking form, guest details included.
///
/// # Errors
///
/// Returns the failing fields.
pub fn validate_booking_form(request: &BookingRequest) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    let guest = &request.guest_info;

    if guest.first_name.trim().is_empty() {
        errors.push("first_name", "First name is required");
    }
    if guest.last_name.trim().is_empty() {
        errors.push("last_name", "Last name is required");
    }
    if guest.email.trim().is_empty() {
        errors.push("email", "Email is required");
    } else if !is_valid_email(&guest.email) {
        errors.push("email", "Please enter a valid email");
    }
    if guest.phone.trim().is_empty() {
        errors.push("phone", "Phone number is required");
    }
    check_stay(request, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_stay(request: &BookingRequest, errors: &mut FormErrors) {
    if request.check_out <= request.check_in {
        errors.push("check_out", "Check-out must be after check-in");
    }
    if request.guests < 1 {
        errors.push("guests", "Number of guests must be at least 1");
    }
}
