//! Payments Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    auth::UserUuid,
    database::{RepositoryError, amount_from_column, amount_to_column, violated_constraint},
    domain::{
        bookings::{
            records::{BookingRecord, BookingUuid},
            repository::fetch_booking,
        },
        payments::{
            data::{PaymentCompletion, PaymentDraft},
            records::{PaymentRecord, PaymentUuid},
        },
    },
};

const COUNT_PAYMENTS_WITH_PREFIX_SQL: &str = include_str!("sql/count_payments_with_prefix.sql");
const CREATE_PAYMENT_SQL: &str = include_str!("sql/create_payment.sql");
const GET_PAYMENT_SQL: &str = include_str!("sql/get_payment.sql");
const FIND_PAYMENT_BY_BOOKING_SQL: &str = include_str!("sql/find_payment_by_booking.sql");
const FIND_PAYMENT_BY_ORDER_ID_SQL: &str = include_str!("sql/find_payment_by_order_id.sql");
const LIST_PAYMENTS_SQL: &str = include_str!("sql/list_payments.sql");
const UPDATE_PAYMENT_ORDER_SQL: &str = include_str!("sql/update_payment_order.sql");
const COMPLETE_PAYMENT_SQL: &str = include_str!("sql/complete_payment.sql");
const LINK_BOOKING_PAYMENT_SQL: &str = include_str!("sql/link_booking_payment.sql");

const ONE_PAYMENT_PER_BOOKING: &str = "payments_booking_uuid_key";

#[derive(Debug, Clone)]
pub struct PgPaymentsRepository {
    pool: PgPool,
}

impl PgPaymentsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentsRepository for PgPaymentsRepository {
    async fn count_with_prefix(&self, prefix: &str) -> Result<u64, RepositoryError> {
        let count: i64 = query_scalar(COUNT_PAYMENTS_WITH_PREFIX_SQL)
            .bind(prefix)
            .fetch_one(&self.pool)
            .await?;

        Ok(amount_from_column("count", count)?)
    }

    async fn get_payment(&self, payment: PaymentUuid) -> Result<PaymentRecord, RepositoryError> {
        Ok(query_as::<Postgres, PaymentRecord>(GET_PAYMENT_SQL)
            .bind(payment.into_uuid())
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_by_booking(
        &self,
        booking: BookingUuid,
    ) -> Result<Option<PaymentRecord>, RepositoryError> {
        Ok(query_as::<Postgres, PaymentRecord>(FIND_PAYMENT_BY_BOOKING_SQL)
            .bind(booking.into_uuid())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PaymentRecord>, RepositoryError> {
        Ok(query_as::<Postgres, PaymentRecord>(FIND_PAYMENT_BY_ORDER_ID_SQL)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list_payments(
        &self,
        owner: Option<UserUuid>,
    ) -> Result<Vec<PaymentRecord>, RepositoryError> {
        Ok(query_as::<Postgres, PaymentRecord>(LIST_PAYMENTS_SQL)
            .bind(owner.map(UserUuid::into_uuid))
            .fetch_all(&self.pool)
            .await?)
    }

    #[tracing::instrument(
        name = "payments.repository.create_payment",
        skip(self, draft),
        fields(payment_uuid = %draft.uuid, booking_uuid = %draft.booking_uuid),
        err
    )]
    async fn create_payment(&self, draft: PaymentDraft) -> Result<PaymentRecord, RepositoryError> {
        query_as::<Postgres, PaymentRecord>(CREATE_PAYMENT_SQL)
            .bind(draft.uuid.into_uuid())
            .bind(&draft.human_id)
            .bind(draft.booking_uuid.into_uuid())
            .bind(draft.user_uuid.into_uuid())
            .bind(&draft.gateway_order_id)
            .bind(amount_to_column("amount", draft.amount)?)
            .bind(&draft.currency)
            .fetch_one(&self.pool)
            .await
            .map_err(|error| {
                if violated_constraint(&error) == Some(ONE_PAYMENT_PER_BOOKING) {
                    RepositoryError::Conflict
                } else {
                    error.into()
                }
            })
    }

    async fn update_order(
        &self,
        payment: PaymentUuid,
        order_id: &str,
        amount: u64,
    ) -> Result<PaymentRecord, RepositoryError> {
        query_as::<Postgres, PaymentRecord>(UPDATE_PAYMENT_ORDER_SQL)
            .bind(payment.into_uuid())
            .bind(order_id)
            .bind(amount_to_column("amount", amount)?)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::Conflict)
    }

    #[tracing::instrument(
        name = "payments.repository.complete_payment",
        skip(self, completion),
        fields(
            payment_uuid = %completion.payment_uuid,
            booking_uuid = %completion.booking_uuid,
        ),
        err
    )]
    async fn complete_payment(
        &self,
        completion: PaymentCompletion,
    ) -> Result<(PaymentRecord, BookingRecord), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let payment = query_as::<Postgres, PaymentRecord>(COMPLETE_PAYMENT_SQL)
            .bind(completion.payment_uuid.into_uuid())
            .bind(&completion.gateway_payment_id)
            .bind(&completion.gateway_signature)
            .bind(SqlxTimestamp::from(completion.paid_at))
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(RepositoryError::Conflict)?;

        let linked = query(LINK_BOOKING_PAYMENT_SQL)
            .bind(completion.booking_uuid.into_uuid())
            .bind(payment.uuid.into_uuid())
            .execute(&mut *tx)
            .await?;

        if linked.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        let booking = fetch_booking(&mut tx, completion.booking_uuid).await?;

        tx.commit().await?;

        Ok((payment, booking))
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: PaymentUuid::from_uuid(row.try_get("uuid")?),
            human_id: row.try_get("human_id")?,
            booking_uuid: BookingUuid::from_uuid(row.try_get("booking_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get::<Uuid, _>("user_uuid")?),
            gateway_order_id: row.try_get("gateway_order_id")?,
            gateway_payment_id: row.try_get("gateway_payment_id")?,
            gateway_signature: row.try_get("gateway_signature")?,
            amount: amount_from_column("amount", row.try_get("amount")?)?,
            currency: row.try_get("currency")?,
            payment_method: row.try_get("payment_method")?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(|paid_at| paid_at.to_jiff()),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[automock]
#[async_trait]
pub trait PaymentsRepository: Send + Sync {
    /// Number of payments whose human id starts with `prefix`.
    async fn count_with_prefix(&self, prefix: &str) -> Result<u64, RepositoryError>;

    async fn get_payment(&self, payment: PaymentUuid) -> Result<PaymentRecord, RepositoryError>;

    /// The payment attached to a booking, if one was ever opened.
    async fn find_by_booking(
        &self,
        booking: BookingUuid,
    ) -> Result<Option<PaymentRecord>, RepositoryError>;

    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PaymentRecord>, RepositoryError>;

    /// Payments newest first, optionally restricted to one owner.
    async fn list_payments(
        &self,
        owner: Option<UserUuid>,
    ) -> Result<Vec<PaymentRecord>, RepositoryError>;

    /// Insert a `pending` payment.
    ///
    /// A second payment for the same booking fails with
    /// [`RepositoryError::Conflict`]; any other duplicate (such as the human
    /// id) with [`RepositoryError::AlreadyExists`].
    async fn create_payment(&self, draft: PaymentDraft) -> Result<PaymentRecord, RepositoryError>;

    /// Point a not-yet-completed payment at a fresh gateway order.
    async fn update_order(
        &self,
        payment: PaymentUuid,
        order_id: &str,
        amount: u64,
    ) -> Result<PaymentRecord, RepositoryError>;

    /// Mark a payment completed and link its booking in one transaction.
    ///
    /// A pending booking becomes confirmed; any other status is left as it is.
    /// Fails with [`RepositoryError::Conflict`] if the payment is already completed.
    async fn complete_payment(
        &self,
        completion: PaymentCompletion,
    ) -> Result<(PaymentRecord, BookingRecord), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            bookings::{BookingsService, records::BookingStatus},
            payments::{PaymentsService, data::VerifyPayment, records::PaymentStatus},
        },
        test::{
            TestContext,
            helpers::{booking_request, create_activity, create_package},
        },
    };

    use super::*;

    #[tokio::test]
    async fn verified_payment_confirms_booking_in_one_write() -> TestResult {
        let ctx = TestContext::new().await;
        let package = create_package(&ctx, "Tea Estate Weekend", 5_000).await?;
        let trek = create_activity(&ctx, "Sunrise trek", 500).await?;

        let booking = ctx
            .bookings
            .create_booking(ctx.customer, booking_request(package.uuid, &[trek.uuid]))
            .await?;

        assert_eq!(booking.total_amount, 11_000);

        let order = ctx.payments.create_order(ctx.customer, booking.uuid).await?;
        let verified = ctx
            .payments
            .verify_payment(
                ctx.customer,
                VerifyPayment {
                    signature: ctx.gateway.sign(&order.order_id, "pay_xyz"),
                    order_id: order.order_id.clone(),
                    payment_id: "pay_xyz".to_string(),
                    booking: booking.uuid,
                },
            )
            .await?;

        let stored = PgPaymentsRepository::new(ctx.db.pool().clone())
            .get_payment(order.payment_uuid)
            .await?;

        assert_eq!(stored.status, PaymentStatus::Completed);
        assert_eq!(stored.gateway_payment_id.as_deref(), Some("pay_xyz"));
        assert_eq!(verified.booking.status, BookingStatus::Confirmed);
        assert_eq!(verified.booking.payment_uuid, Some(stored.uuid));
        assert_eq!(ctx.notifier.sent().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn second_payment_for_booking_conflicts() -> TestResult {
        let ctx = TestContext::new().await;
        let package = create_package(&ctx, "Tea Estate Weekend", 5_000).await?;
        let booking = ctx
            .bookings
            .create_booking(ctx.customer, booking_request(package.uuid, &[]))
            .await?;
        let repository = PgPaymentsRepository::new(ctx.db.pool().clone());

        let draft = |human_id: &str, order_id: &str| PaymentDraft {
            uuid: PaymentUuid::new(),
            human_id: human_id.to_string(),
            booking_uuid: booking.uuid,
            user_uuid: booking.user_uuid,
            gateway_order_id: order_id.to_string(),
            amount: booking.total_amount,
            currency: "INR".to_string(),
        };

        repository
            .create_payment(draft("PAY2026000001-00000001", "order_one"))
            .await?;

        let result = repository
            .create_payment(draft("PAY2026000002-00000002", "order_two"))
            .await;

        assert!(
            matches!(result, Err(RepositoryError::Conflict)),
            "expected Conflict, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn completed_payment_cannot_be_completed_or_repointed() -> TestResult {
        let ctx = TestContext::new().await;
        let package = create_package(&ctx, "Tea Estate Weekend", 5_000).await?;
        let booking = ctx
            .bookings
            .create_booking(ctx.customer, booking_request(package.uuid, &[]))
            .await?;
        let repository = PgPaymentsRepository::new(ctx.db.pool().clone());

        let payment = repository
            .create_payment(PaymentDraft {
                uuid: PaymentUuid::new(),
                human_id: "PAY2026000001-00000001".to_string(),
                booking_uuid: booking.uuid,
                user_uuid: booking.user_uuid,
                gateway_order_id: "order_one".to_string(),
                amount: booking.total_amount,
                currency: "INR".to_string(),
            })
            .await?;

        let completion = PaymentCompletion {
            payment_uuid: payment.uuid,
            gateway_payment_id: "pay_xyz".to_string(),
            gateway_signature: "signature".to_string(),
            paid_at: jiff::Timestamp::now(),
            booking_uuid: booking.uuid,
        };

        let (_, confirmed) = repository.complete_payment(completion.clone()).await?;

        assert_eq!(confirmed.status, BookingStatus::Confirmed);

        let again = repository.complete_payment(completion).await;

        assert!(
            matches!(again, Err(RepositoryError::Conflict)),
            "expected Conflict, got {again:?}"
        );

        let repoint = repository
            .update_order(payment.uuid, "order_two", booking.total_amount)
            .await;

        assert!(
            matches!(repoint, Err(RepositoryError::Conflict)),
            "expected Conflict, got {repoint:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn completion_never_revives_a_cancelled_booking() -> TestResult {
        let ctx = TestContext::new().await;
        let package = create_package(&ctx, "Tea Estate Weekend", 5_000).await?;
        let booking = ctx
            .bookings
            .create_booking(ctx.customer, booking_request(package.uuid, &[]))
            .await?;
        let repository = PgPaymentsRepository::new(ctx.db.pool().clone());

        let payment = repository
            .create_payment(PaymentDraft {
                uuid: PaymentUuid::new(),
                human_id: "PAY2026000001-00000001".to_string(),
                booking_uuid: booking.uuid,
                user_uuid: booking.user_uuid,
                gateway_order_id: "order_one".to_string(),
                amount: booking.total_amount,
                currency: "INR".to_string(),
            })
            .await?;

        ctx.bookings.cancel_booking(ctx.customer, booking.uuid).await?;

        let (completed, linked) = repository
            .complete_payment(PaymentCompletion {
                payment_uuid: payment.uuid,
                gateway_payment_id: "pay_xyz".to_string(),
                gateway_signature: "signature".to_string(),
                paid_at: jiff::Timestamp::now(),
                booking_uuid: booking.uuid,
            })
            .await?;

        assert_eq!(completed.status, PaymentStatus::Completed);
        assert_eq!(linked.status, BookingStatus::Cancelled);
        assert_eq!(linked.payment_uuid, Some(payment.uuid));

        Ok(())
    }
}
