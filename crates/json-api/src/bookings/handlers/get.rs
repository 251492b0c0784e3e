//! Get Booking Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use homestay_app::domain::bookings::records::{BookedActivity, BookingRecord, GuestDetails};

use crate::{bookings::errors::into_status_error, envelope::Envelope, extensions::*};

/// Booking Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingResponse {
    /// The unique identifier of the booking
    pub id: Uuid,

    /// Human readable reference, e.g. `HH2026-0001-12345678`
    pub booking_id: String,

    pub user_id: Uuid,

    pub package_id: Uuid,

    pub package_name: String,

    pub activities: Vec<BookedActivityResponse>,

    pub guest_details: GuestDetailsResponse,

    /// First night of the stay (`YYYY-MM-DD`)
    pub check_in: String,

    /// Departure day (`YYYY-MM-DD`)
    pub check_out: String,

    pub adults: u32,

    pub children: u32,

    pub special_requests: String,

    /// Package price times adults, in paise
    pub package_amount: u64,

    /// Sum of activity prices times adults, in paise
    pub activities_amount: u64,

    /// Amount charged for the booking, in paise
    pub total_amount: u64,

    /// One of `pending`, `confirmed`, `cancelled` or `completed`
    pub status: String,

    /// Payment opened for this booking, if any
    pub payment_id: Option<Uuid>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<BookingRecord> for BookingResponse {
    fn from(booking: BookingRecord) -> Self {
        BookingResponse {
            id: booking.uuid.into(),
            booking_id: booking.human_id,
            user_id: booking.user_uuid.into(),
            package_id: booking.package.uuid.into(),
            package_name: booking.package.name,
            activities: booking.activities.into_iter().map(Into::into).collect(),
            guest_details: booking.guest.into(),
            check_in: booking.check_in.to_string(),
            check_out: booking.check_out.to_string(),
            adults: booking.adults,
            children: booking.children,
            special_requests: booking.special_requests,
            package_amount: booking.package_amount,
            activities_amount: booking.activities_amount,
            total_amount: booking.total_amount,
            status: booking.status.to_string(),
            payment_id: booking.payment_uuid.map(Into::into),
            created_at: booking.created_at.to_string(),
            updated_at: booking.updated_at.to_string(),
        }
    }
}

/// Activity included in a booking
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookedActivityResponse {
    pub id: Uuid,

    pub name: String,

    /// Per-adult price at booking time, in paise
    pub price: u64,
}

impl From<BookedActivity> for BookedActivityResponse {
    fn from(activity: BookedActivity) -> Self {
        Self {
            id: activity.uuid.into(),
            name: activity.name,
            price: activity.price,
        }
    }
}

/// Lead guest contact details
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GuestDetailsResponse {
    pub full_name: String,

    pub email: String,

    pub phone: String,
}

impl From<GuestDetails> for GuestDetailsResponse {
    fn from(guest: GuestDetails) -> Self {
        Self {
            full_name: guest.full_name,
            email: guest.email,
            phone: guest.phone,
        }
    }
}

/// Get Booking Handler
///
/// Returns a booking owned by the caller. Admins can read any booking.
#[endpoint(
    tags("bookings"),
    summary = "Get Booking",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Booking found"),
        (status_code = StatusCode::FORBIDDEN, description = "Booking belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
    ),
)]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<BookingResponse>>, StatusError> {
    let state = depot.app_state()?;
    let session = depot.session_or_401()?;

    let booking = state
        .app
        .bookings
        .get_booking(session, booking.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok("Booking retrieved", booking.into()))
}
