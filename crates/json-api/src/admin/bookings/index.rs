//! Admin Booking Index Handler

use salvo::prelude::*;

use crate::{
    bookings::{errors::into_status_error, get::BookingResponse},
    envelope::Envelope,
    extensions::*,
};

/// Admin Booking Index Handler
///
/// Returns every booking, newest first.
#[endpoint(
    tags("admin"),
    summary = "List All Bookings",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<BookingResponse>>>, StatusError> {
    let state = depot.app_state()?;
    let session = depot.session_or_401()?;

    let bookings = state
        .app
        .bookings
        .list_all_bookings(session)
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok(
        "Bookings retrieved",
        bookings.into_iter().map(Into::into).collect(),
    ))
}
