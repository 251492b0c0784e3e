//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use homestay_app::domain::payments::PaymentsServiceError;

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::BookingNotFound => {
            StatusError::not_found().brief("Booking not found")
        }
        PaymentsServiceError::PaymentNotFound => {
            StatusError::not_found().brief("Payment not found")
        }
        PaymentsServiceError::Forbidden => {
            StatusError::forbidden().brief("Not allowed to access this payment")
        }
        PaymentsServiceError::InvalidAmount => {
            StatusError::bad_request().brief("Booking has no payable amount")
        }
        PaymentsServiceError::InvalidState => {
            StatusError::bad_request().brief("Booking can no longer be paid")
        }
        PaymentsServiceError::AlreadyPaid => {
            StatusError::bad_request().brief("Payment already completed for this booking")
        }
        PaymentsServiceError::SignatureMismatch => {
            StatusError::bad_request().brief("Payment verification failed")
        }
        PaymentsServiceError::Gateway(source) => {
            error!("payment gateway request failed: {source}");

            StatusError::internal_server_error().brief("Failed to create payment order")
        }
        PaymentsServiceError::Conflict => {
            StatusError::conflict().brief("Payment was modified concurrently, please retry")
        }
        PaymentsServiceError::IdentifierCollision => {
            error!("exhausted payment id retries");

            StatusError::internal_server_error()
        }
        PaymentsServiceError::Storage(source) => {
            error!("payment storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
