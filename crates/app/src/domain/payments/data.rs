//! Payments Data

use jiff::Timestamp;

use crate::{
    auth::UserUuid,
    domain::{
        bookings::records::{BookingRecord, BookingUuid},
        payments::records::{PaymentRecord, PaymentUuid},
    },
};

/// New payment persistence payload. Payments always start `pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDraft {
    pub uuid: PaymentUuid,
    pub human_id: String,
    pub booking_uuid: BookingUuid,
    pub user_uuid: UserUuid,
    pub gateway_order_id: String,
    pub amount: u64,
    pub currency: String,
}

/// Gateway callback fields recorded when a payment is completed.
///
/// The booking is confirmed in the same write only while it is still pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCompletion {
    pub payment_uuid: PaymentUuid,
    pub gateway_payment_id: String,
    pub gateway_signature: String,
    pub paid_at: Timestamp,
    pub booking_uuid: BookingUuid,
}

/// Everything a client needs to open the gateway checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub payment_uuid: PaymentUuid,
    pub order_id: String,
    pub amount: u64,
    pub currency: String,
    pub key_id: String,
}

/// Gateway callback as submitted by the client after checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPayment {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    pub booking: BookingUuid,
}

/// Outcome of a successful verification.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedPayment {
    pub payment: PaymentRecord,
    pub booking: BookingRecord,
}
