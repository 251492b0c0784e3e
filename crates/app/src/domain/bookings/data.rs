//! Bookings Data

use jiff::{Timestamp, civil::Date, tz::TimeZone};

use crate::{
    auth::UserUuid,
    domain::{
        bookings::{
            errors::BookingValidationError,
            records::{BookingStatus, BookingUuid, GuestDetails},
        },
        catalog::records::{ActivityUuid, PackageUuid},
    },
};

/// Booking request as submitted by a guest.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub package: PackageUuid,
    /// Raw ids from the client; malformed or unknown ids are dropped.
    pub activity_ids: Vec<String>,
    pub guest: GuestDetails,
    pub check_in: Date,
    pub check_out: Date,
    pub adults: u32,
    pub children: u32,
    pub special_requests: String,
}

impl NewBooking {
    /// Checks that need no catalog access.
    ///
    /// # Errors
    ///
    /// Returns the first problem found with the guest, stay, or head count.
    pub fn validate(&self) -> Result<(), BookingValidationError> {
        validate_guest(&self.guest)?;

        if self.check_out <= self.check_in {
            return Err(BookingValidationError::InvalidStayDates);
        }

        if self.adults < 1 {
            return Err(BookingValidationError::NoAdults);
        }

        Ok(())
    }
}

fn validate_guest(guest: &GuestDetails) -> Result<(), BookingValidationError> {
    if guest.full_name.trim().is_empty() {
        return Err(BookingValidationError::MissingGuestName);
    }

    let email_ok = guest
        .email
        .trim()
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        });

    if !email_ok {
        return Err(BookingValidationError::InvalidGuestEmail);
    }

    if guest.phone.trim().is_empty() {
        return Err(BookingValidationError::MissingGuestPhone);
    }

    Ok(())
}

/// Priced activity line to persist with a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingActivityLine {
    pub uuid: ActivityUuid,
    pub price: u64,
}

/// Fully priced booking, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDraft {
    pub uuid: BookingUuid,
    pub human_id: String,
    pub user_uuid: UserUuid,
    pub package_uuid: PackageUuid,
    pub activities: Vec<BookingActivityLine>,
    pub guest: GuestDetails,
    pub check_in: Date,
    pub check_out: Date,
    pub adults: u32,
    pub children: u32,
    pub special_requests: String,
    pub package_amount: u64,
    pub activities_amount: u64,
    pub total_amount: u64,
    pub status: BookingStatus,
}

/// Parse a stay date given either as `YYYY-MM-DD` or as an RFC 3339 timestamp
/// (date taken in UTC).
#[must_use]
pub fn parse_stay_date(value: &str) -> Option<Date> {
    let value = value.trim();

    value.parse::<Date>().ok().or_else(|| {
        value
            .parse::<Timestamp>()
            .ok()
            .map(|timestamp| timestamp.to_zoned(TimeZone::UTC).date())
    })
}
