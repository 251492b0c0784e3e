use async_trait::async_trait;
use tracing::info;

use crate::notifications::{BookingConfirmation, Notifier, NotifierError};

/// Notifier used when no mail transport is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_booking_confirmation(
        &self,
        confirmation: &BookingConfirmation,
    ) -> Result<(), NotifierError> {
        info!(
            booking = %confirmation.booking.human_id,
            payment = %confirmation.payment.human_id,
            "mail transport not configured, skipping booking confirmation"
        );

        Ok(())
    }
}
