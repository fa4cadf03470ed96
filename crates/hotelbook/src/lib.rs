//! `hotelbook` - A hotel booking service with a persistent local snapshot store
//!
//! This library provides the room catalog, bookings, user accounts and the
//! back-office dashboard. State lives in memory and is mirrored into a
//! SQLite key/value store after every change.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod quote;
pub mod response;
pub mod seed;
pub mod service;
pub mod session;
pub mod storage;
pub mod validation;

pub use config::{Config, PricingPolicy};
pub use error::{Error, Result, ServiceError};
pub use logging::init_logging;
pub use response::ApiResponse;
pub use service::HotelService;
pub use storage::{Storage, StorageStats};
