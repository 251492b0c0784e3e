//! Confirmation notifications.
//!
//! Sent after a payment has been verified. Delivery is best effort: callers
//! log failures and carry on.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::{bookings::records::BookingRecord, payments::records::PaymentRecord};

mod log;
mod smtp;
mod templates;

pub use log::LogNotifier;
pub use smtp::{SmtpConfig, SmtpNotifier};

/// Everything the confirmation message is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfirmation {
    pub booking: BookingRecord,
    pub payment: PaymentRecord,
}

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("invalid mail address")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message")]
    Message(#[from] lettre::error::Error),

    #[error("failed to deliver message")]
    Transport(#[from] lettre::transport::smtp::Error),
}

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell the guest their booking is confirmed and paid.
    async fn send_booking_confirmation(
        &self,
        confirmation: &BookingConfirmation,
    ) -> Result<(), NotifierError>;
}
