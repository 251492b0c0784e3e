//! Booking Records

use std::{fmt, str::FromStr};

use jiff::{Timestamp, civil::Date};
use thiserror::Error;

use crate::{
    auth::UserUuid,
    domain::{
        catalog::records::{ActivityUuid, PackageUuid},
        payments::records::PaymentUuid,
    },
    uuids::TypedUuid,
};

/// Booking UUID
pub type BookingUuid = TypedUuid<BookingRecord>;

/// Booking lifecycle.
///
/// ```text
/// pending ──(payment verified)──> confirmed ──(admin)──> completed
///    │                                │
///    └────────────> cancelled <───────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Error)]
#[error("unknown booking status: {0}")]
pub struct UnknownBookingStatus(String);

impl BookingStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Whether the status machine has an edge from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending | Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = UnknownBookingStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownBookingStatus(other.to_string())),
        }
    }
}

/// Contact details of the lead guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Package reference resolved for a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedPackage {
    pub uuid: PackageUuid,
    pub name: String,
}

/// Activity included in a booking, with its per-adult price at booking time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedActivity {
    pub uuid: ActivityUuid,
    pub name: String,
    pub price: u64,
}

/// Booking Record
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    pub uuid: BookingUuid,
    pub human_id: String,
    pub user_uuid: UserUuid,
    pub package: BookedPackage,
    pub activities: Vec<BookedActivity>,
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
    pub payment_uuid: Option<PaymentUuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
        BookingStatus::Completed,
    ];

    #[test]
    fn nothing_leaves_cancelled() {
        for next in ALL {
            assert!(
                !BookingStatus::Cancelled.can_transition_to(next),
                "cancelled must be terminal, but allowed -> {next}"
            );
        }
    }

    #[test]
    fn cancellation_allowed_from_pending_and_confirmed_only() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Cancelled));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Cancelled));
        assert!(!BookingStatus::Completed.can_transition_to(BookingStatus::Cancelled));
    }

    #[test]
    fn completion_requires_confirmation() {
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::Pending.can_transition_to(BookingStatus::Completed));
    }

    #[test]
    fn no_self_transitions() {
        for status in ALL {
            assert!(!status.can_transition_to(status), "{status} -> {status}");
        }
    }

    #[test]
    fn status_round_trips_through_storage_value() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<BookingStatus>().ok(), Some(status));
        }

        assert!("archived".parse::<BookingStatus>().is_err());
    }
}
