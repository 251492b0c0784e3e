//! Bookings service.

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
            data::{BookingActivityLine, BookingDraft, NewBooking},
            errors::BookingsServiceError,
            pricing::{parse_activity_ids, quote},
            records::{BookingRecord, BookingStatus, BookingUuid},
            repository::{BookingsRepository, PgBookingsRepository},
        },
        catalog::{CatalogRepository, PgCatalogRepository},
    },
    human_ids::{HumanIdKind, year_of},
};

#[derive(Clone)]
pub struct PgBookingsService {
    bookings: Arc<dyn BookingsRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

impl std::fmt::Debug for PgBookingsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgBookingsService").finish_non_exhaustive()
    }
}

impl PgBookingsService {
    #[must_use]
    pub fn new(db: &Db) -> Self {
        Self::with_repositories(
            Arc::new(PgBookingsRepository::new(db.pool().clone())),
            Arc::new(PgCatalogRepository::new(db.pool().clone())),
        )
    }

    #[must_use]
    pub fn with_repositories(
        bookings: Arc<dyn BookingsRepository>,
        catalog: Arc<dyn CatalogRepository>,
    ) -> Self {
        Self { bookings, catalog }
    }

    async fn next_human_id(&self, now: Timestamp) -> String {
        let prefix = HumanIdKind::Booking.year_prefix(year_of(now));

        let existing = match self.bookings.count_with_prefix(&prefix).await {
            Ok(count) => Some(count),
            Err(error) => {
                warn!("booking sequence unavailable, using fallback id: {error}");

                None
            }
        };

        HumanIdKind::Booking.generate(existing, now)
    }

    async fn load_visible(
        &self,
        session: Session,
        booking: BookingUuid,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let record = self.bookings.get_booking(booking).await?;

        if !session.can_access(record.user_uuid) {
            return Err(BookingsServiceError::Forbidden);
        }

        Ok(record)
    }
}

#[async_trait]
impl BookingsService for PgBookingsService {
    #[tracing::instrument(
        name = "bookings.service.create_booking",
        skip(self, session, booking),
        fields(user_uuid = %session.user, package_uuid = %booking.package),
        err
    )]
    async fn create_booking(
        &self,
        session: Session,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError> {
        booking.validate()?;

        let package = self
            .catalog
            .get_package(booking.package)
            .await
            .map_err(|error| match error {
                RepositoryError::NotFound => BookingsServiceError::PackageNotFound,
                other => BookingsServiceError::Storage(other),
            })?;

        let requested = parse_activity_ids(&booking.activity_ids);
        let catalog = self.catalog.find_activities(&requested).await?;
        let priced = quote(&package, &requested, &catalog, booking.adults)?;

        if priced.activities.len() < booking.activity_ids.len() {
            warn!(
                requested = booking.activity_ids.len(),
                kept = priced.activities.len(),
                "dropped unknown or inactive activities from booking"
            );
        }

        let now = Timestamp::now();

        let mut draft = BookingDraft {
            uuid: BookingUuid::new(),
            human_id: self.next_human_id(now).await,
            user_uuid: session.user,
            package_uuid: package.uuid,
            activities: priced
                .activities
                .iter()
                .map(|activity| BookingActivityLine {
                    uuid: activity.uuid,
                    price: activity.price,
                })
                .collect(),
            guest: booking.guest,
            check_in: booking.check_in,
            check_out: booking.check_out,
            adults: booking.adults,
            children: booking.children,
            special_requests: booking.special_requests,
            package_amount: priced.package_amount,
            activities_amount: priced.activities_amount,
            total_amount: priced.total_amount,
            status: BookingStatus::Pending,
        };

        let created = match self.bookings.create_booking(draft.clone()).await {
            Err(RepositoryError::AlreadyExists) => {
                warn!(human_id = %draft.human_id, "booking id taken, retrying once");

                draft.human_id = HumanIdKind::Booking.fallback(now, &mut rand::thread_rng());

                self.bookings
                    .create_booking(draft)
                    .await
                    .map_err(|error| match error {
                        RepositoryError::AlreadyExists => BookingsServiceError::IdentifierCollision,
                        other => other.into(),
                    })?
            }
            other => other?,
        };

        info!(booking_uuid = %created.uuid, human_id = %created.human_id, "booking created");

        Ok(created)
    }

    async fn get_booking(
        &self,
        session: Session,
        booking: BookingUuid,
    ) -> Result<BookingRecord, BookingsServiceError> {
        self.load_visible(session, booking).await
    }

    async fn list_bookings(
        &self,
        session: Session,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError> {
        Ok(self.bookings.list_bookings(Some(session.user)).await?)
    }

    async fn list_all_bookings(
        &self,
        session: Session,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError> {
        if !session.is_admin() {
            return Err(BookingsServiceError::Forbidden);
        }

        Ok(self.bookings.list_bookings(None).await?)
    }

    #[tracing::instrument(
        name = "bookings.service.cancel_booking",
        skip(self, session),
        fields(user_uuid = %session.user, booking_uuid = %booking),
        err
    )]
    async fn cancel_booking(
        &self,
        session: Session,
        booking: BookingUuid,
    ) -> Result<BookingRecord, BookingsServiceError> {
        let current = self.load_visible(session, booking).await?;

        match current.status {
            BookingStatus::Cancelled => Err(BookingsServiceError::AlreadyCancelled),
            from if from.can_transition_to(BookingStatus::Cancelled) => Ok(self
                .bookings
                .update_status(booking, from, BookingStatus::Cancelled)
                .await?),
            from => Err(BookingsServiceError::InvalidTransition {
                from,
                to: BookingStatus::Cancelled,
            }),
        }
    }

    async fn update_status(
        &self,
        session: Session,
        booking: BookingUuid,
        status: BookingStatus,
    ) -> Result<BookingRecord, BookingsServiceError> {
        if !session.is_admin() {
            return Err(BookingsServiceError::Forbidden);
        }

        let current = self.bookings.get_booking(booking).await?;

        match (current.status, status) {
            (BookingStatus::Cancelled, BookingStatus::Cancelled) => {
                Err(BookingsServiceError::AlreadyCancelled)
            }
            // Confirmation belongs to payment verification.
            (from, to) if to == BookingStatus::Confirmed || !from.can_transition_to(to) => {
                Err(BookingsServiceError::InvalidTransition { from, to })
            }
            (from, to) => Ok(self.bookings.update_status(booking, from, to).await?),
        }
    }
}

#[automock]
#[async_trait]
pub trait BookingsService: Send + Sync {
    /// Price and store a new `pending` booking owned by the caller.
    async fn create_booking(
        &self,
        session: Session,
        booking: NewBooking,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// A booking visible to the caller (its owner or an admin).
    async fn get_booking(
        &self,
        session: Session,
        booking: BookingUuid,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// The caller's own bookings, newest first.
    async fn list_bookings(
        &self,
        session: Session,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError>;

    /// Every booking. Admin only.
    async fn list_all_bookings(
        &self,
        session: Session,
    ) -> Result<Vec<BookingRecord>, BookingsServiceError>;

    /// Cancel a pending or confirmed booking.
    async fn cancel_booking(
        &self,
        session: Session,
        booking: BookingUuid,
    ) -> Result<BookingRecord, BookingsServiceError>;

    /// Administrative status change. Confirmation is not available here.
    async fn update_status(
        &self,
        session: Session,
        booking: BookingUuid,
        status: BookingStatus,
    ) -> Result<BookingRecord, BookingsServiceError>;
}
