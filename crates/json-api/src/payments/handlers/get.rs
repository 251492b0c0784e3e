//! Get Payment Handler

use std::string::ToString;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use homestay_app::domain::payments::records::PaymentRecord;

use crate::{envelope::Envelope, extensions::*, payments::errors::into_status_error};

/// Payment Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentResponse {
    /// The unique identifier of the payment
    pub id: Uuid,

    /// Human readable reference, e.g. `PAY2026000001-12345678`
    pub payment_id: String,

    pub booking_id: Uuid,

    pub user_id: Uuid,

    /// Gateway order the checkout was opened against
    pub order_id: String,

    /// Gateway payment id, set once verified
    pub gateway_payment_id: Option<String>,

    /// Amount in minor units of `currency`
    pub amount: u64,

    pub currency: String,

    pub payment_method: String,

    /// One of `pending`, `completed`, `failed` or `refunded`
    pub status: String,

    pub paid_at: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(payment: PaymentRecord) -> Self {
        PaymentResponse {
            id: payment.uuid.into(),
            payment_id: payment.human_id,
            booking_id: payment.booking_uuid.into(),
            user_id: payment.user_uuid.into(),
            order_id: payment.gateway_order_id,
            gateway_payment_id: payment.gateway_payment_id,
            amount: payment.amount,
            currency: payment.currency,
            payment_method: payment.payment_method,
            status: payment.status.to_string(),
            paid_at: payment.paid_at.as_ref().map(ToString::to_string),
            created_at: payment.created_at.to_string(),
            updated_at: payment.updated_at.to_string(),
        }
    }
}

/// Get Payment Handler
///
/// Returns a payment owned by the caller. Admins can read any payment.
#[endpoint(
    tags("payments"),
    summary = "Get Payment",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    payment: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<PaymentResponse>>, StatusError> {
    let state = depot.app_state()?;
    let session = depot.session_or_401()?;

    let payment = state
        .app
        .payments
        .get_payment(session, payment.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok("Payment retrieved", payment.into()))
}
