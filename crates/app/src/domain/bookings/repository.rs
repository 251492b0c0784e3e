//! Bookings Repository

use async_trait::async_trait;
use jiff_sqlx::{Date as SqlxDate, Timestamp as SqlxTimestamp};
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{
    FromRow, PgConnection, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    auth::UserUuid,
    database::{RepositoryError, amount_from_column, amount_to_column},
    domain::{
        bookings::{
            data::BookingDraft,
            records::{
                BookedActivity, BookedPackage, BookingRecord, BookingStatus, BookingUuid,
                GuestDetails,
            },
        },
        catalog::records::{ActivityUuid, PackageUuid},
        payments::records::PaymentUuid,
    },
};

const COUNT_BOOKINGS_WITH_PREFIX_SQL: &str = include_str!("sql/count_bookings_with_prefix.sql");
const CREATE_BOOKING_SQL: &str = include_str!("sql/create_booking.sql");
const CREATE_BOOKING_ACTIVITIES_SQL: &str = include_str!("sql/create_booking_activities.sql");
const GET_BOOKING_SQL: &str = include_str!("sql/get_booking.sql");
const LIST_BOOKINGS_SQL: &str = include_str!("sql/list_bookings.sql");
const LIST_BOOKING_ACTIVITIES_SQL: &str = include_str!("sql/list_booking_activities.sql");
const UPDATE_BOOKING_STATUS_SQL: &str = include_str!("sql/update_booking_status.sql");

#[derive(Debug, Clone)]
pub struct PgBookingsRepository {
    pool: PgPool,
}

impl PgBookingsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingsRepository for PgBookingsRepository {
    async fn count_with_prefix(&self, prefix: &str) -> Result<u64, RepositoryError> {
        let count: i64 = query_scalar(COUNT_BOOKINGS_WITH_PREFIX_SQL)
            .bind(prefix)
            .fetch_one(&self.pool)
            .await?;

        Ok(amount_from_column("count", count)?)
    }

    #[tracing::instrument(
        name = "bookings.repository.create_booking",
        skip(self, draft),
        fields(booking_uuid = %draft.uuid, human_id = %draft.human_id),
        err
    )]
    async fn create_booking(&self, draft: BookingDraft) -> Result<BookingRecord, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        query(CREATE_BOOKING_SQL)
            .bind(draft.uuid.into_uuid())
            .bind(&draft.human_id)
            .bind(draft.user_uuid.into_uuid())
            .bind(draft.package_uuid.into_uuid())
            .bind(&draft.guest.full_name)
            .bind(&draft.guest.email)
            .bind(&draft.guest.phone)
            .bind(SqlxDate::from(draft.check_in))
            .bind(SqlxDate::from(draft.check_out))
            .bind(count_to_column("adults", draft.adults)?)
            .bind(count_to_column("children", draft.children)?)
            .bind(&draft.special_requests)
            .bind(amount_to_column("package_amount", draft.package_amount)?)
            .bind(amount_to_column("activities_amount", draft.activities_amount)?)
            .bind(amount_to_column("total_amount", draft.total_amount)?)
            .bind(draft.status.as_str())
            .execute(&mut *tx)
            .await?;

        if !draft.activities.is_empty() {
            let activity_uuids: Vec<Uuid> = draft
                .activities
                .iter()
                .map(|line| line.uuid.into_uuid())
                .collect();

            let prices = draft
                .activities
                .iter()
                .map(|line| amount_to_column("price", line.price))
                .collect::<Result<Vec<i64>, _>>()?;

            query(CREATE_BOOKING_ACTIVITIES_SQL)
                .bind(draft.uuid.into_uuid())
                .bind(&activity_uuids)
                .bind(&prices)
                .execute(&mut *tx)
                .await?;
        }

        let booking = fetch_booking(&mut tx, draft.uuid).await?;

        tx.commit().await?;

        debug!(activities = booking.activities.len(), "booking stored");

        Ok(booking)
    }

    async fn get_booking(&self, booking: BookingUuid) -> Result<BookingRecord, RepositoryError> {
        let mut conn = self.pool.acquire().await?;

        Ok(fetch_booking(&mut conn, booking).await?)
    }

    async fn list_bookings(
        &self,
        owner: Option<UserUuid>,
    ) -> Result<Vec<BookingRecord>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;

        let mut bookings = query_as::<Postgres, BookingRecord>(LIST_BOOKINGS_SQL)
            .bind(owner.map(UserUuid::into_uuid))
            .fetch_all(&mut *conn)
            .await?;

        attach_activities(&mut conn, &mut bookings).await?;

        Ok(bookings)
    }

    #[tracing::instrument(
        name = "bookings.repository.update_status",
        skip(self),
        fields(booking_uuid = %booking),
        err
    )]
    async fn update_status(
        &self,
        booking: BookingUuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<BookingRecord, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let rows_affected = query(UPDATE_BOOKING_STATUS_SQL)
            .bind(booking.into_uuid())
            .bind(from.as_str())
            .bind(to.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(RepositoryError::Conflict);
        }

        let updated = fetch_booking(&mut tx, booking).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

/// Load one booking with its activities on an existing connection.
pub(crate) async fn fetch_booking(
    conn: &mut PgConnection,
    booking: BookingUuid,
) -> Result<BookingRecord, sqlx::Error> {
    let record = query_as::<Postgres, BookingRecord>(GET_BOOKING_SQL)
        .bind(booking.into_uuid())
        .fetch_one(&mut *conn)
        .await?;

    let mut bookings = vec![record];

    attach_activities(conn, &mut bookings).await?;

    bookings.pop().ok_or(sqlx::Error::RowNotFound)
}

async fn attach_activities(
    conn: &mut PgConnection,
    bookings: &mut [BookingRecord],
) -> Result<(), sqlx::Error> {
    if bookings.is_empty() {
        return Ok(());
    }

    let uuids: Vec<Uuid> = bookings.iter().map(|b| b.uuid.into_uuid()).collect();

    let rows = query(LIST_BOOKING_ACTIVITIES_SQL)
        .bind(&uuids)
        .fetch_all(&mut *conn)
        .await?;

    let mut by_booking: FxHashMap<Uuid, Vec<BookedActivity>> = FxHashMap::default();

    for row in rows {
        by_booking
            .entry(row.try_get("booking_uuid")?)
            .or_default()
            .push(BookedActivity {
                uuid: ActivityUuid::from_uuid(row.try_get("activity_uuid")?),
                name: row.try_get("name")?,
                price: amount_from_column("price", row.try_get("price")?)?,
            });
    }

    for booking in bookings {
        booking.activities = by_booking
            .remove(&booking.uuid.into_uuid())
            .unwrap_or_default();
    }

    Ok(())
}

fn count_to_column(column: &str, count: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn count_from_column(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    u32::try_from(row.try_get::<i32, _>(column)?).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for BookingRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        Ok(Self {
            uuid: BookingUuid::from_uuid(row.try_get("uuid")?),
            human_id: row.try_get("human_id")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            package: BookedPackage {
                uuid: PackageUuid::from_uuid(row.try_get("package_uuid")?),
                name: row.try_get("package_name")?,
            },
            activities: Vec::new(),
            guest: GuestDetails {
                full_name: row.try_get("guest_full_name")?,
                email: row.try_get("guest_email")?,
                phone: row.try_get("guest_phone")?,
            },
            check_in: row.try_get::<SqlxDate, _>("check_in")?.to_jiff(),
            check_out: row.try_get::<SqlxDate, _>("check_out")?.to_jiff(),
            adults: count_from_column(row, "adults")?,
            children: count_from_column(row, "children")?,
            special_requests: row.try_get("special_requests")?,
            package_amount: amount_from_column("package_amount", row.try_get("package_amount")?)?,
            activities_amount: amount_from_column(
                "activities_amount",
                row.try_get("activities_amount")?,
            )?,
            total_amount: amount_from_column("total_amount", row.try_get("total_amount")?)?,
            status: status.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            payment_uuid: row
                .try_get::<Option<Uuid>, _>("payment_uuid")?
                .map(PaymentUuid::from_uuid),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[automock]
#[async_trait]
pub trait BookingsRepository: Send + Sync {
    /// Number of bookings whose human id starts with `prefix`.
    async fn count_with_prefix(&self, prefix: &str) -> Result<u64, RepositoryError>;

    /// Insert a booking and its activity lines atomically.
    ///
    /// A taken human id surfaces as [`RepositoryError::AlreadyExists`].
    async fn create_booking(&self, draft: BookingDraft) -> Result<BookingRecord, RepositoryError>;

    async fn get_booking(&self, booking: BookingUuid) -> Result<BookingRecord, RepositoryError>;

    /// Bookings newest first, optionally restricted to one owner.
    async fn list_bookings(
        &self,
        owner: Option<UserUuid>,
    ) -> Result<Vec<BookingRecord>, RepositoryError>;

    /// Move a booking from `from` to `to`.
    ///
    /// Fails with [`RepositoryError::Conflict`] if the stored status is no longer `from`.
    async fn update_status(
        &self,
        booking: BookingUuid,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<BookingRecord, RepositoryError>;
}
