//! Bookings
//!
//! Reservations of a package (plus optional activities) for a stay, priced
//! at creation time and moved through a small status machine afterwards.

pub mod data;
pub mod errors;
pub mod pricing;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::{BookingValidationError, BookingsServiceError};
pub use repository::{BookingsRepository, MockBookingsRepository, PgBookingsRepository};
pub use service::*;
