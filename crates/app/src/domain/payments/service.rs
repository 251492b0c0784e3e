//! Payments service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    auth::Session,
    database::{Db, RepositoryError},
    domain::{
        bookings::{
            BookingsRepository, PgBookingsRepository,
            records::{BookingRecord, BookingStatus, BookingUuid},
        },
        payments::{
            data::{OrderSummary, PaymentCompletion, PaymentDraft, VerifiedPayment, VerifyPayment},
            errors::PaymentsServiceError,
            gateway::{OrderRequest, PaymentGateway},
            records::{PaymentRecord, PaymentUuid},
            repository::{PaymentsRepository, PgPaymentsRepository},
        },
    },
    human_ids::{HumanIdKind, year_of},
    notifications::{BookingConfirmation, Notifier},
};

/// Currency every booking is priced and charged in.
pub const CURRENCY: &str = "INR";

#[derive(Clone)]
pub struct PgPaymentsService {
    payments: Arc<dyn PaymentsRepository>,
    bookings: Arc<dyn BookingsRepository>,
    gateway: Arc<dyn PaymentGateway>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for PgPaymentsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPaymentsService").finish_non_exhaustive()
    }
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: &Db, gateway: Arc<dyn PaymentGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_repositories(
            Arc::new(PgPaymentsRepository::new(db.pool().clone())),
            Arc::new(PgBookingsRepository::new(db.pool().clone())),
            gateway,
            notifier,
        )
    }

    #[must_use]
    pub fn with_repositories(
        payments: Arc<dyn PaymentsRepository>,
        bookings: Arc<dyn BookingsRepository>,
        gateway: Arc<dyn PaymentGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            payments,
            bookings,
            gateway,
            notifier,
        }
    }

    async fn load_booking(
        &self,
        booking: BookingUuid,
    ) -> Result<BookingRecord, PaymentsServiceError> {
        self.bookings
            .get_booking(booking)
            .await
            .map_err(|error| match error {
                RepositoryError::NotFound => PaymentsServiceError::BookingNotFound,
                other => PaymentsServiceError::Storage(other),
            })
    }

    async fn next_human_id(&self, now: Timestamp) -> String {
        let prefix = HumanIdKind::Payment.year_prefix(year_of(now));

        let existing = match self.payments.count_with_prefix(&prefix).await {
            Ok(count) => Some(count),
            Err(error) => {
                warn!("payment sequence unavailable, using fallback id: {error}");

                None
            }
        };

        HumanIdKind::Payment.generate(existing, now)
    }

    /// Re-point an open payment at a new gateway order.
    async fn point_at_order(
        &self,
        payment: PaymentUuid,
        order_id: &str,
        amount: u64,
    ) -> Result<PaymentRecord, PaymentsServiceError> {
        self.payments
            .update_order(payment, order_id, amount)
            .await
            .map_err(|error| match error {
                RepositoryError::Conflict => PaymentsServiceError::AlreadyPaid,
                other => PaymentsServiceError::Storage(other),
            })
    }

    async fn open_payment(
        &self,
        booking: &BookingRecord,
        order_id: &str,
    ) -> Result<PaymentRecord, PaymentsServiceError> {
        let now = Timestamp::now();

        let mut draft = PaymentDraft {
            uuid: PaymentUuid::new(),
            human_id: self.next_human_id(now).await,
            booking_uuid: booking.uuid,
            user_uuid: booking.user_uuid,
            gateway_order_id: order_id.to_string(),
            amount: booking.total_amount,
            currency: CURRENCY.to_string(),
        };

        let created = match self.payments.create_payment(draft.clone()).await {
            Err(RepositoryError::AlreadyExists) => {
                warn!(human_id = %draft.human_id, "payment id taken, retrying once");

                draft.human_id = HumanIdKind::Payment.fallback(now, &mut rand::thread_rng());

                match self.payments.create_payment(draft).await {
                    Err(RepositoryError::AlreadyExists) => {
                        return Err(PaymentsServiceError::IdentifierCollision);
                    }
                    other => other,
                }
            }
            other => other,
        };

        match created {
            Err(RepositoryError::Conflict) => {
                // Lost the race with a concurrent create-order for this booking.
                let existing = self
                    .payments
                    .find_by_booking(booking.uuid)
                    .await?
                    .ok_or(PaymentsServiceError::Conflict)?;

                self.point_at_order(existing.uuid, order_id, booking.total_amount)
                    .await
            }
            other => Ok(other?),
        }
    }

    /// Answer a repeated callback for a completed payment.
    async fn already_verified(
        &self,
        payment: PaymentRecord,
        gateway_payment_id: &str,
    ) -> Result<VerifiedPayment, PaymentsServiceError> {
        if payment.gateway_payment_id.as_deref() != Some(gateway_payment_id) {
            return Err(PaymentsServiceError::AlreadyPaid);
        }

        let booking = self.load_booking(payment.booking_uuid).await?;

        info!(payment = %payment.human_id, "payment already verified");

        Ok(VerifiedPayment { payment, booking })
    }
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    #[tracing::instrument(
        name = "payments.service.create_order",
        skip(self, session),
        fields(user_uuid = %session.user, booking_uuid = %booking),
        err
    )]
    async fn create_order(
        &self,
        session: Session,
        booking: BookingUuid,
    ) -> Result<OrderSummary, PaymentsServiceError> {
        let booking = self.load_booking(booking).await?;

        if booking.user_uuid != session.user {
            return Err(PaymentsServiceError::Forbidden);
        }

        if booking.total_amount == 0 {
            return Err(PaymentsServiceError::InvalidAmount);
        }

        match booking.status {
            BookingStatus::Pending => {}
            BookingStatus::Cancelled => return Err(PaymentsServiceError::InvalidState),
            BookingStatus::Confirmed | BookingStatus::Completed => {
                return Err(PaymentsServiceError::AlreadyPaid);
            }
        }

        let existing = self.payments.find_by_booking(booking.uuid).await?;

        if existing.as_ref().is_some_and(PaymentRecord::is_completed) {
            return Err(PaymentsServiceError::AlreadyPaid);
        }

        let order = self
            .gateway
            .create_order(OrderRequest {
                amount: booking.total_amount,
                currency: CURRENCY.to_string(),
                receipt: booking.human_id.clone(),
                notes: vec![
                    ("booking_id".to_string(), booking.human_id.clone()),
                    ("booking_uuid".to_string(), booking.uuid.to_string()),
                ],
            })
            .await?;

        let payment = match existing {
            Some(existing) => {
                self.point_at_order(existing.uuid, &order.id, booking.total_amount)
                    .await?
            }
            None => self.open_payment(&booking, &order.id).await?,
        };

        info!(payment = %payment.human_id, order_id = %order.id, "payment order opened");

        Ok(OrderSummary {
            payment_uuid: payment.uuid,
            order_id: order.id,
            amount: payment.amount,
            currency: payment.currency,
            key_id: self.gateway.key_id(),
        })
    }

    #[tracing::instrument(
        name = "payments.service.verify_payment",
        skip(self, session, request),
        fields(user_uuid = %session.user, order_id = %request.order_id),
        err
    )]
    async fn verify_payment(
        &self,
        session: Session,
        request: VerifyPayment,
    ) -> Result<VerifiedPayment, PaymentsServiceError> {
        if !self.gateway.verify_signature(
            &request.order_id,
            &request.payment_id,
            &request.signature,
        ) {
            warn!("payment signature mismatch");

            return Err(PaymentsServiceError::SignatureMismatch);
        }

        let payment = self
            .payments
            .find_by_order_id(&request.order_id)
            .await?
            .ok_or(PaymentsServiceError::PaymentNotFound)?;

        if payment.booking_uuid != request.booking {
            return Err(PaymentsServiceError::BookingNotFound);
        }

        if payment.is_completed() {
            return self.already_verified(payment, &request.payment_id).await;
        }

        let completion = PaymentCompletion {
            payment_uuid: payment.uuid,
            gateway_payment_id: request.payment_id.clone(),
            gateway_signature: request.signature.clone(),
            paid_at: Timestamp::now(),
            booking_uuid: payment.booking_uuid,
        };

        let (payment, booking) = match self.payments.complete_payment(completion).await {
            Ok(completed) => completed,
            Err(RepositoryError::Conflict) => {
                let stored = self.payments.get_payment(payment.uuid).await?;

                return self.already_verified(stored, &request.payment_id).await;
            }
            Err(error) => return Err(error.into()),
        };

        info!(payment = %payment.human_id, booking = %booking.human_id, "payment verified");

        if booking.status != BookingStatus::Confirmed {
            warn!(
                booking = %booking.human_id,
                status = %booking.status,
                "payment verified for a booking that is no longer pending; no confirmation sent"
            );

            return Ok(VerifiedPayment { payment, booking });
        }

        let confirmation = BookingConfirmation { booking, payment };

        if let Err(error) = self.notifier.send_booking_confirmation(&confirmation).await {
            warn!(
                booking = %confirmation.booking.human_id,
                "failed to send booking confirmation: {error}"
            );
        }

        Ok(VerifiedPayment {
            payment: confirmation.payment,
            booking: confirmation.booking,
        })
    }

    async fn get_payment(
        &self,
        session: Session,
        payment: PaymentUuid,
    ) -> Result<PaymentRecord, PaymentsServiceError> {
        let payment = self
            .payments
            .get_payment(payment)
            .await
            .map_err(|error| match error {
                RepositoryError::NotFound => PaymentsServiceError::PaymentNotFound,
                other => PaymentsServiceError::Storage(other),
            })?;

        if !session.can_access(payment.user_uuid) {
            return Err(PaymentsServiceError::Forbidden);
        }

        Ok(payment)
    }

    async fn list_payments(
        &self,
        session: Session,
    ) -> Result<Vec<PaymentRecord>, PaymentsServiceError> {
        Ok(self.payments.list_payments(Some(session.user)).await?)
    }

    async fn list_all_payments(
        &self,
        session: Session,
    ) -> Result<Vec<PaymentRecord>, PaymentsServiceError> {
        if !session.is_admin() {
            return Err(PaymentsServiceError::Forbidden);
        }

        Ok(self.payments.list_payments(None).await?)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Open (or re-open) a gateway order for the caller's pending booking.
    async fn create_order(
        &self,
        session: Session,
        booking: BookingUuid,
    ) -> Result<OrderSummary, PaymentsServiceError>;

    /// Check a checkout callback and, when it is genuine, complete the
    /// payment and confirm its booking.
    async fn verify_payment(
        &self,
        session: Session,
        request: VerifyPayment,
    ) -> Result<VerifiedPayment, PaymentsServiceError>;

    /// A payment visible to the caller (its owner or an admin).
    async fn get_payment(
        &self,
        session: Session,
        payment: PaymentUuid,
    ) -> Result<PaymentRecord, PaymentsServiceError>;

    /// The caller's own payments, newest first.
    async fn list_payments(
        &self,
        session: Session,
    ) -> Result<Vec<PaymentRecord>, PaymentsServiceError>;

    /// Every payment. Admin only.
    async fn list_all_payments(
        &self,
        session: Session,
    ) -> Result<Vec<PaymentRecord>, PaymentsServiceError>;
}
