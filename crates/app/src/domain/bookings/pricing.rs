//! Booking pricing.
//!
//! Amounts are per adult in minor units; children are not charged.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use uuid::Uuid;

use crate::domain::{
    bookings::errors::BookingValidationError,
    catalog::records::{Activity, ActivityUuid, Package},
};

/// Requested activity ids, deduplicated, in request order.
pub type RequestedActivities = SmallVec<[ActivityUuid; 4]>;

/// Computed amounts for a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub package_amount: u64,
    pub activities_amount: u64,
    pub total_amount: u64,
    /// Activities that were requested, exist, and are active.
    pub activities: Vec<Activity>,
}

/// Keep the syntactically valid ids from a client-supplied list.
#[must_use]
pub fn parse_activity_ids(raw: &[String]) -> RequestedActivities {
    let mut seen = FxHashSet::default();

    raw.iter()
        .filter_map(|id| Uuid::try_parse(id.trim()).ok())
        .filter(|uuid| seen.insert(*uuid))
        .map(ActivityUuid::from_uuid)
        .collect()
}

/// Price a booking from a catalog snapshot.
///
/// Requested activities missing from `catalog` or flagged inactive are
/// dropped rather than failing the quote.
///
/// # Errors
///
/// Fails when there is no adult, the package has no positive price, or an
/// amount overflows.
pub fn quote(
    package: &Package,
    requested: &[ActivityUuid],
    catalog: &[Activity],
    adults: u32,
) -> Result<Quote, BookingValidationError> {
    if adults < 1 {
        return Err(BookingValidationError::NoAdults);
    }

    if package.price == 0 {
        return Err(BookingValidationError::InvalidPackagePrice);
    }

    let activities: Vec<Activity> = requested
        .iter()
        .filter_map(|uuid| catalog.iter().find(|activity| activity.uuid == *uuid))
        .filter(|activity| activity.is_active())
        .cloned()
        .collect();

    let adults = u64::from(adults);

    let package_amount = package
        .price
        .checked_mul(adults)
        .ok_or(BookingValidationError::AmountOverflow)?;

    let activities_amount = activities
        .iter()
        .try_fold(0_u64, |sum, activity| sum.checked_add(activity.price))
        .and_then(|per_adult| per_adult.checked_mul(adults))
        .ok_or(BookingValidationError::AmountOverflow)?;

    let total_amount = package_amount
        .checked_add(activities_amount)
        .ok_or(BookingValidationError::AmountOverflow)?;

    Ok(Quote {
        package_amount,
        activities_amount,
        total_amount,
        activities,
    })
}
