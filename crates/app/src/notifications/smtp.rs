//! SMTP delivery via `lettre`.

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::debug;

use crate::notifications::{BookingConfirmation, Notifier, NotifierError, templates};

/// SMTP relay settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpNotifier")
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

impl SmtpNotifier {
    /// Build a notifier for the given relay.
    ///
    /// # Errors
    ///
    /// Returns an error if the sender address or relay host is invalid.
    pub fn new(config: SmtpConfig) -> Result<Self, NotifierError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(config.username, config.password))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self {
            transport,
            from: config.from.parse()?,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    #[tracing::instrument(
        name = "notifications.smtp.send_booking_confirmation",
        skip(self, confirmation),
        fields(booking = %confirmation.booking.human_id),
        err
    )]
    async fn send_booking_confirmation(
        &self,
        confirmation: &BookingConfirmation,
    ) -> Result<(), NotifierError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(confirmation.booking.guest.email.trim().parse()?)
            .subject(templates::subject(confirmation))
            .header(ContentType::TEXT_HTML)
            .body(templates::confirmation_html(confirmation))?;

        self.transport.send(email).await?;

        debug!("booking confirmation sent");

        Ok(())
    }
}
