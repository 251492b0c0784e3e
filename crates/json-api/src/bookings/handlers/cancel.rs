//! Cancel Booking Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    bookings::{errors::into_status_error, get::BookingResponse},
    envelope::Envelope,
    extensions::*,
    observability::{LedgerEvent, record_ledger_event},
};

/// Cancel Booking Handler
///
/// Cancels a pending or confirmed booking. Owners and admins only.
#[endpoint(
    tags("bookings"),
    summary = "Cancel Booking",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Booking cancelled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Booking cannot be cancelled"),
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
        .cancel_booking(session, booking.into_inner().into())
        .await
        .map_err(into_status_error)?;

    record_ledger_event(LedgerEvent::BookingCancelled);

    Ok(Envelope::ok("Booking cancelled successfully", booking.into()))
}
