//! Create Booking Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use homestay_app::domain::bookings::{
    data::{NewBooking, parse_stay_date},
    records::GuestDetails,
};

use crate::{
    bookings::{errors::into_status_error, get::BookingResponse},
    envelope::Envelope,
    extensions::*,
    observability::{LedgerEvent, record_ledger_event},
};

/// Create Booking Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBookingRequest {
    pub package_id: Uuid,

    /// Optional add-on activities. Unknown or inactive ids are ignored.
    #[serde(default)]
    pub activity_ids: Vec<String>,

    pub guest_details: GuestDetailsRequest,

    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub check_in: String,

    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    pub check_out: String,

    pub adults: u32,

    #[serde(default)]
    pub children: u32,

    #[serde(default)]
    pub special_requests: Option<String>,
}

/// Lead guest contact details
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GuestDetailsRequest {
    pub full_name: String,

    pub email: String,

    pub phone: String,
}

impl CreateBookingRequest {
    fn into_new_booking(self) -> Result<NewBooking, StatusError> {
        let check_in = parse_stay_date(&self.check_in)
            .ok_or_else(|| StatusError::bad_request().brief("Invalid check-in date"))?;

        let check_out = parse_stay_date(&self.check_out)
            .ok_or_else(|| StatusError::bad_request().brief("Invalid check-out date"))?;

        Ok(NewBooking {
            package: self.package_id.into(),
            activity_ids: self.activity_ids,
            guest: GuestDetails {
                full_name: self.guest_details.full_name,
                email: self.guest_details.email,
                phone: self.guest_details.phone,
            },
            check_in,
            check_out,
            adults: self.adults,
            children: self.children,
            special_requests: self.special_requests.unwrap_or_default(),
        })
    }
}

/// Create Booking Handler
///
/// Prices the stay and stores a `pending` booking for the caller.
#[endpoint(
    tags("bookings"),
    summary = "Create Booking",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Booking created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid booking request"),
        (status_code = StatusCode::NOT_FOUND, description = "Package not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateBookingRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<BookingResponse>>, StatusError> {
    let state = depot.app_state()?;
    let session = depot.session_or_401()?;
    let booking = json.into_inner().into_new_booking()?;

    let booking = state
        .app
        .bookings
        .create_booking(session, booking)
        .await
        .map_err(into_status_error)?;

    record_ledger_event(LedgerEvent::BookingCreated);

    res.created_at(&format!("/bookings/{}", booking.uuid))?;

    Ok(Envelope::ok("Booking created successfully", booking.into()))
}
