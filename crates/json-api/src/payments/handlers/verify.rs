//! Verify Payment Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use homestay_app::domain::payments::{
    PaymentsServiceError,
    data::{VerifiedPayment, VerifyPayment},
};

use crate::{
    bookings::get::BookingResponse,
    envelope::Envelope,
    extensions::*,
    observability::{LedgerEvent, record_ledger_event},
    payments::{errors::into_status_error, get::PaymentResponse},
};

/// Verify Payment Request
///
/// Accepts the checkout callback fields under their gateway names too.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyPaymentRequest {
    #[serde(alias = "razorpay_order_id")]
    pub order_id: String,

    #[serde(alias = "razorpay_payment_id")]
    pub payment_id: String,

    #[serde(alias = "razorpay_signature")]
    pub signature: String,

    pub booking_id: Uuid,
}

impl From<VerifyPaymentRequest> for VerifyPayment {
    fn from(request: VerifyPaymentRequest) -> Self {
        VerifyPayment {
            order_id: request.order_id,
            payment_id: request.payment_id,
            signature: request.signature,
            booking: request.booking_id.into(),
        }
    }
}

/// Verified payment with its confirmed booking
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifiedPaymentResponse {
    pub payment: PaymentResponse,

    pub booking: BookingResponse,
}

impl From<VerifiedPayment> for VerifiedPaymentResponse {
    fn from(verified: VerifiedPayment) -> Self {
        Self {
            payment: verified.payment.into(),
            booking: verified.booking.into(),
        }
    }
}

/// Verify Payment Handler
///
/// Checks the gateway signature, completes the payment and confirms its
/// booking. Verifying an already completed payment again returns it unchanged.
#[endpoint(
    tags("payments"),
    summary = "Verify Payment",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment verified"),
        (status_code = StatusCode::BAD_REQUEST, description = "Signature mismatch or payment already completed"),
        (status_code = StatusCode::NOT_FOUND, description = "Payment not found"),
        (status_code = StatusCode::CONFLICT, description = "Payment was modified concurrently"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<VerifyPaymentRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<VerifiedPaymentResponse>>, StatusError> {
    let state = depot.app_state()?;
    let session = depot.session_or_401()?;

    let verified = state
        .app
        .payments
        .verify_payment(session, json.into_inner().into())
        .await
        .map_err(|error| {
            if matches!(error, PaymentsServiceError::SignatureMismatch) {
                record_ledger_event(LedgerEvent::SignatureRejected);
            }

            into_status_error(error)
        })?;

    record_ledger_event(LedgerEvent::PaymentVerified);

    Ok(Envelope::ok("Payment verified successfully", verified.into()))
}
