//! Bookings service errors.

use thiserror::Error;

use crate::{database::RepositoryError, domain::bookings::records::BookingStatus};

/// User-fixable problems with a booking request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingValidationError {
    #[error("guest full name is required")]
    MissingGuestName,

    #[error("a valid guest email is required")]
    InvalidGuestEmail,

    #[error("guest phone number is required")]
    MissingGuestPhone,

    #[error("check-out date must be after check-in date")]
    InvalidStayDates,

    #[error("at least one adult is required")]
    NoAdults,

    #[error("package has no bookable price")]
    InvalidPackagePrice,

    #[error("booking amount is too large")]
    AmountOverflow,
}

#[derive(Debug, Error)]
pub enum BookingsServiceError {
    #[error(transparent)]
    Validation(#[from] BookingValidationError),

    #[error("package not found")]
    PackageNotFound,

    #[error("booking not found")]
    NotFound,

    #[error("not allowed to access this booking")]
    Forbidden,

    #[error("booking is already cancelled")]
    AlreadyCancelled,

    #[error("booking cannot move from {from} to {to}")]
    InvalidTransition { from: BookingStatus, to: BookingStatus },

    #[error("booking was modified concurrently")]
    Conflict,

    #[error("could not allocate a unique booking id")]
    IdentifierCollision,

    #[error("storage error")]
    Storage(#[source] RepositoryError),
}

impl From<RepositoryError> for BookingsServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict => Self::Conflict,
            other => Self::Storage(other),
        }
    }
}
