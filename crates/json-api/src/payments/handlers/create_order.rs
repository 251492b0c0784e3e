//! Create Order Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use homestay_app::domain::payments::data::OrderSummary;

use crate::{
    envelope::Envelope,
    extensions::*,
    observability::{LedgerEvent, record_ledger_event},
    payments::errors::into_status_error,
};

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateOrderRequest {
    pub booking_id: Uuid,
}

/// Checkout details for the payment gateway
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    /// Payment record opened for the booking
    pub payment_id: Uuid,

    /// Gateway order to open the checkout with
    pub order_id: String,

    /// Amount in minor units of `currency`
    pub amount: u64,

    pub currency: String,

    /// Public gateway key for the checkout widget
    pub key_id: String,
}

impl From<OrderSummary> for OrderResponse {
    fn from(order: OrderSummary) -> Self {
        Self {
            payment_id: order.payment_uuid.into(),
            order_id: order.order_id,
            amount: order.amount,
            currency: order.currency,
            key_id: order.key_id,
        }
    }
}

/// Create Order Handler
///
/// Opens a gateway order for the caller's pending booking. Repeated calls
/// reuse the booking's single payment record.
#[endpoint(
    tags("payments"),
    summary = "Create Payment Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Booking cannot be paid or is already paid"),
        (status_code = StatusCode::FORBIDDEN, description = "Booking belongs to another user"),
        (status_code = StatusCode::NOT_FOUND, description = "Booking not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Gateway failure"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<OrderResponse>>, StatusError> {
    let state = depot.app_state()?;
    let session = depot.session_or_401()?;

    let order = state
        .app
        .payments
        .create_order(session, json.into_inner().booking_id.into())
        .await
        .map_err(into_status_error)?;

    record_ledger_event(LedgerEvent::OrderCreated);

    Ok(Envelope::ok("Order created successfully", order.into()))
}
