//! Admin Booking Status Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use homestay_app::domain::bookings::records::BookingStatus;

use crate::{
    bookings::{errors::into_status_error, get::BookingResponse},
    envelope::Envelope,
    extensions::*,
};

/// Update Booking Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// Target status: `cancelled` or `completed`
    pub status: String,
}

/// Admin Booking Status Handler
///
/// Moves a booking along its lifecycle. Confirmation only happens through
/// payment verification.
#[endpoint(
    tags("admin"),
    summary = "Update Booking Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Booking updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Transition not allowed"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
    ),
)]
pub(crate) async fn handler(
    booking: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<BookingResponse>>, StatusError> {
    let state = depot.app_state()?;
    let session = depot.session_or_401()?;

    let status = json
        .into_inner()
        .status
        .parse::<BookingStatus>()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let booking = state
        .app
        .bookings
        .update_status(session, booking.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok("Booking status updated", booking.into()))
}
