//! Booking Errors

use salvo::http::StatusError;
use tracing::error;

use homestay_app::domain::bookings::BookingsServiceError;

pub(crate) fn into_status_error(error: BookingsServiceError) -> StatusError {
    match error {
        BookingsServiceError::Validation(reason) => {
            StatusError::bad_request().brief(capitalize(&reason.to_string()))
        }
        BookingsServiceError::PackageNotFound => {
            StatusError::not_found().brief("Package not found")
        }
        BookingsServiceError::NotFound => StatusError::not_found().brief("Booking not found"),
        BookingsServiceError::Forbidden => {
            StatusError::forbidden().brief("Not allowed to access this booking")
        }
        BookingsServiceError::AlreadyCancelled => {
            StatusError::bad_request().brief("Booking is already cancelled")
        }
        BookingsServiceError::InvalidTransition { from, to } => {
            StatusError::bad_request().brief(format!("Booking cannot move from {from} to {to}"))
        }
        BookingsServiceError::Conflict => {
            StatusError::conflict().brief("Booking was modified concurrently, please retry")
        }
        BookingsServiceError::IdentifierCollision => {
            error!("exhausted booking id retries");

            StatusError::internal_server_error()
        }
        BookingsServiceError::Storage(source) => {
            error!("booking storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();

    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
