//! Payment Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;

use crate::{auth::UserUuid, domain::bookings::records::BookingUuid, uuids::TypedUuid};

/// Payment UUID
pub type PaymentUuid = TypedUuid<PaymentRecord>;

/// Payment lifecycle. Only `pending -> completed` is driven by this service;
/// `failed` and `refunded` are recorded by back-office tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

#[derive(Debug, Error)]
#[error("unknown payment status: {0}")]
pub struct UnknownPaymentStatus(String);

impl PaymentStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownPaymentStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(UnknownPaymentStatus(other.to_string())),
        }
    }
}

/// Payment Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRecord {
    pub uuid: PaymentUuid,
    pub human_id: String,
    pub booking_uuid: BookingUuid,
    pub user_uuid: UserUuid,
    pub gateway_order_id: String,
    pub gateway_payment_id: Option<String>,
    pub gateway_signature: Option<String>,
    /// Minor units of `currency`.
    pub amount: u64,
    pub currency: String,
    pub payment_method: String,
    pub status: PaymentStatus,
    pub paid_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PaymentRecord {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}
