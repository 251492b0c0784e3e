//! Booking and payment flows run against the in-memory store.

use std::sync::Arc;

use jiff::civil::date;
use testresult::TestResult;

use crate::{
    auth::{Role, Session, UserUuid},
    domain::{
        bookings::{
            BookingValidationError, BookingsService, BookingsServiceError, PgBookingsService,
            data::NewBooking,
            records::{BookingRecord, BookingStatus, GuestDetails},
        },
        catalog::records::{ActivityUuid, PackageUuid},
        payments::{
            PaymentsService, PaymentsServiceError, PgPaymentsService, data::VerifyPayment,
            records::PaymentStatus,
        },
    },
    test::memory::{MemoryStore, RecordingNotifier, StubGateway},
};

const SECRET: &str = "scenario_secret";

struct Ledger {
    store: Arc<MemoryStore>,
    gateway: Arc<StubGateway>,
    notifier: Arc<RecordingNotifier>,
    bookings: PgBookingsService,
    payments: PgPaymentsService,
    guest: Session,
    admin: Session,
}

impl Ledger {
    fn new() -> Self {
        Self::with_gateway(StubGateway::new(SECRET))
    }

    fn with_gateway(gateway: StubGateway) -> Self {
        let store = Arc::new(MemoryStore::default());
        let gateway = Arc::new(gateway);
        let notifier = Arc::new(RecordingNotifier::default());

        Self {
            bookings: PgBookingsService::with_repositories(store.clone(), store.clone()),
            payments: PgPaymentsService::with_repositories(
                store.clone(),
                store.clone(),
                gateway.clone(),
                notifier.clone(),
            ),
            store,
            gateway,
            notifier,
            guest: Session::new(UserUuid::new(), Role::Customer),
            admin: Session::new(UserUuid::new(), Role::Admin),
        }
    }

    fn verify_request(
        &self,
        booking: &BookingRecord,
        order_id: &str,
        payment_id: &str,
    ) -> VerifyPayment {
        VerifyPayment {
            order_id: order_id.to_string(),
            payment_id: payment_id.to_string(),
            signature: self.gateway.sign(order_id, payment_id),
            booking: booking.uuid,
        }
    }
}

fn stay(package: PackageUuid, activities: &[ActivityUuid], adults: u32) -> NewBooking {
    NewBooking {
        package,
        activity_ids: activities.iter().map(ToString::to_string).collect(),
        guest: GuestDetails {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
        },
        check_in: date(2026, 12, 24),
        check_out: date(2026, 12, 26),
        adults,
        children: 1,
        special_requests: "Ground floor room".to_string(),
    }
}

#[tokio::test]
async fn paid_booking_ends_confirmed_with_completed_payment() -> TestResult {
    let ledger = Ledger::with_gateway(StubGateway::with_order_ids(SECRET, ["order_abc"]));
    let package = ledger.store.insert_package("Tea Estate Weekend", 5_000);
    let trek = ledger.store.insert_activity("Sunrise trek", 500, Some(true));

    let booking = ledger
        .bookings
        .create_booking(ledger.guest, stay(package.uuid, &[trek.uuid], 2))
        .await?;

    assert_eq!(booking.package_amount, 10_000);
    assert_eq!(booking.activities_amount, 1_000);
    assert_eq!(booking.total_amount, 11_000);
    assert_eq!(booking.status, BookingStatus::Pending);

    let order = ledger.payments.create_order(ledger.guest, booking.uuid).await?;

    assert_eq!(order.order_id, "order_abc");
    assert_eq!(order.amount, 11_000);
    assert_eq!(order.currency, "INR");
    assert_eq!(order.key_id, StubGateway::KEY_ID);

    let verified = ledger
        .payments
        .verify_payment(
            ledger.guest,
            ledger.verify_request(&booking, "order_abc", "pay_xyz"),
        )
        .await?;

    assert_eq!(verified.booking.status, BookingStatus::Confirmed);
    assert_eq!(verified.booking.payment_uuid, Some(verified.payment.uuid));
    assert_eq!(verified.payment.status, PaymentStatus::Completed);
    assert_eq!(verified.payment.gateway_payment_id.as_deref(), Some("pay_xyz"));
    assert!(verified.payment.paid_at.is_some(), "paid_at not recorded");

    let sent = ledger.notifier.sent();

    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].booking.uuid, booking.uuid);

    Ok(())
}

#[tokio::test]
async fn booking_without_adults_leaves_no_row() {
    let ledger = Ledger::new();
    let package = ledger.store.insert_package("Riverside Cottage", 4_000);

    let result = ledger
        .bookings
        .create_booking(ledger.guest, stay(package.uuid, &[], 0))
        .await;

    assert!(
        matches!(
            result,
            Err(BookingsServiceError::Validation(BookingValidationError::NoAdults))
        ),
        "expected NoAdults, got {result:?}"
    );
    assert!(ledger.store.bookings().is_empty(), "booking row was written");
}

#[tokio::test]
async fn inactive_and_unknown_activities_are_not_charged() -> TestResult {
    let ledger = Ledger::new();
    let package = ledger.store.insert_package("Riverside Cottage", 4_000);
    let kayak = ledger.store.insert_activity("Kayaking", 700, None);
    let closed = ledger.store.insert_activity("Night safari", 900, Some(false));

    let mut request = stay(package.uuid, &[kayak.uuid, closed.uuid], 3);
    request.activity_ids.push("not-a-uuid".to_string());
    request.activity_ids.push(ActivityUuid::new().to_string());

    let booking = ledger.bookings.create_booking(ledger.guest, request).await?;

    assert_eq!(booking.activities.len(), 1);
    assert_eq!(booking.activities[0].uuid, kayak.uuid);
    assert_eq!(booking.activities_amount, 2_100);
    assert_eq!(booking.total_amount, 12_000 + 2_100);

    Ok(())
}

#[tokio::test]
async fn repeated_order_requests_share_one_payment() -> TestResult {
    let ledger = Ledger::new();
    let package = ledger.store.insert_package("Tea Estate Weekend", 5_000);

    let booking = ledger
        .bookings
        .create_booking(ledger.guest, stay(package.uuid, &[], 2))
        .await?;

    let first = ledger.payments.create_order(ledger.guest, booking.uuid).await?;
    let second = ledger.payments.create_order(ledger.guest, booking.uuid).await?;

    assert_eq!(first.payment_uuid, second.payment_uuid);
    assert_ne!(first.order_id, second.order_id);
    assert_eq!(ledger.gateway.orders_issued(), 2);

    let payments = ledger.store.payments();

    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].gateway_order_id, second.order_id);
    assert_eq!(payments[0].status, PaymentStatus::Pending);

    Ok(())
}

#[tokio::test]
async fn tampered_signatures_change_nothing() -> TestResult {
    let ledger = Ledger::new();
    let package = ledger.store.insert_package("Tea Estate Weekend", 5_000);

    let booking = ledger
        .bookings
        .create_booking(ledger.guest, stay(package.uuid, &[], 2))
        .await?;
    let order = ledger.payments.create_order(ledger.guest, booking.uuid).await?;
    let genuine = ledger.verify_request(&booking, &order.order_id, "pay_xyz");

    let mut tampered = Vec::new();

    let mut flipped = genuine.clone();
    flipped.signature = flip_last_hex_digit(&genuine.signature);
    tampered.push(flipped);

    let mut other_payment = genuine.clone();
    other_payment.payment_id = "pay_other".to_string();
    tampered.push(other_payment);

    let mut wrong_key = genuine.clone();
    wrong_key.signature = StubGateway::new("someone_elses_secret").sign(&order.order_id, "pay_xyz");
    tampered.push(wrong_key);

    let mut empty = genuine.clone();
    empty.signature = String::new();
    tampered.push(empty);

    for request in tampered {
        let result = ledger.payments.verify_payment(ledger.guest, request).await;

        assert!(
            matches!(result, Err(PaymentsServiceError::SignatureMismatch)),
            "expected SignatureMismatch, got {result:?}"
        );
    }

    let stored = ledger.store.payments();

    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, PaymentStatus::Pending);
    assert_eq!(stored[0].gateway_payment_id, None);
    assert_eq!(ledger.store.bookings()[0].status, BookingStatus::Pending);
    assert!(ledger.notifier.sent().is_empty(), "confirmation sent");

    Ok(())
}

#[tokio::test]
async fn verifying_twice_is_idempotent() -> TestResult {
    let ledger = Ledger::new();
    let package = ledger.store.insert_package("Tea Estate Weekend", 5_000);

    let booking = ledger
        .bookings
        .create_booking(ledger.guest, stay(package.uuid, &[], 2))
        .await?;
    let order = ledger.payments.create_order(ledger.guest, booking.uuid).await?;
    let request = ledger.verify_request(&booking, &order.order_id, "pay_xyz");

    let first = ledger
        .payments
        .verify_payment(ledger.guest, request.clone())
        .await?;
    let second = ledger.payments.verify_payment(ledger.guest, request).await?;

    assert_eq!(first.payment, second.payment);
    assert_eq!(second.booking.status, BookingStatus::Confirmed);
    assert_eq!(ledger.notifier.sent().len(), 1);

    let again = ledger.payments.create_order(ledger.guest, booking.uuid).await;

    assert!(
        matches!(again, Err(PaymentsServiceError::AlreadyPaid)),
        "expected AlreadyPaid, got {again:?}"
    );

    Ok(())
}

#[tokio::test]
async fn admin_moves_paid_booking_to_completed() -> TestResult {
    let ledger = Ledger::new();
    let package = ledger.store.insert_package("Tea Estate Weekend", 5_000);

    let booking = ledger
        .bookings
        .create_booking(ledger.guest, stay(package.uuid, &[], 2))
        .await?;

    let premature = ledger
        .bookings
        .update_status(ledger.admin, booking.uuid, BookingStatus::Completed)
        .await;

    assert!(
        matches!(
            premature,
            Err(BookingsServiceError::InvalidTransition { .. })
        ),
        "expected InvalidTransition, got {premature:?}"
    );

    let order = ledger.payments.create_order(ledger.guest, booking.uuid).await?;
    ledger
        .payments
        .verify_payment(
            ledger.guest,
            ledger.verify_request(&booking, &order.order_id, "pay_xyz"),
        )
        .await?;

    let completed = ledger
        .bookings
        .update_status(ledger.admin, booking.uuid, BookingStatus::Completed)
        .await?;

    assert_eq!(completed.status, BookingStatus::Completed);

    Ok(())
}

#[tokio::test]
async fn cancelled_booking_cannot_be_paid_or_cancelled_again() -> TestResult {
    let ledger = Ledger::new();
    let package = ledger.store.insert_package("Tea Estate Weekend", 5_000);

    let booking = ledger
        .bookings
        .create_booking(ledger.guest, stay(package.uuid, &[], 2))
        .await?;

    let cancelled = ledger
        .bookings
        .cancel_booking(ledger.guest, booking.uuid)
        .await?;

    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    let again = ledger
        .bookings
        .cancel_booking(ledger.guest, booking.uuid)
        .await;

    assert!(
        matches!(again, Err(BookingsServiceError::AlreadyCancelled)),
        "expected AlreadyCancelled, got {again:?}"
    );

    let order = ledger.payments.create_order(ledger.guest, booking.uuid).await;

    assert!(
        matches!(order, Err(PaymentsServiceError::InvalidState)),
        "expected InvalidState, got {order:?}"
    );
    assert_eq!(ledger.gateway.orders_issued(), 0);

    Ok(())
}

#[tokio::test]
async fn payment_landing_after_cancellation_sends_no_confirmation() -> TestResult {
    let ledger = Ledger::with_gateway(StubGateway::with_order_ids(SECRET, ["order_abc"]));
    let package = ledger.store.insert_package("Tea Estate Weekend", 5_000);

    let booking = ledger
        .bookings
        .create_booking(ledger.guest, stay(package.uuid, &[], 2))
        .await?;

    ledger.payments.create_order(ledger.guest, booking.uuid).await?;
    ledger
        .bookings
        .cancel_booking(ledger.guest, booking.uuid)
        .await?;

    let verified = ledger
        .payments
        .verify_payment(
            ledger.guest,
            ledger.verify_request(&booking, "order_abc", "pay_xyz"),
        )
        .await?;

    assert_eq!(verified.payment.status, PaymentStatus::Completed);
    assert_eq!(verified.booking.status, BookingStatus::Cancelled);
    assert_eq!(
        ledger.bookings.get_booking(ledger.guest, booking.uuid).await?.status,
        BookingStatus::Cancelled
    );
    assert!(
        ledger.notifier.sent().is_empty(),
        "cancelled guests must not be told their stay is confirmed"
    );

    Ok(())
}

#[tokio::test]
async fn customers_only_see_their_own_bookings() -> TestResult {
    let ledger = Ledger::new();
    let package = ledger.store.insert_package("Tea Estate Weekend", 5_000);
    let neighbour = Session::new(UserUuid::new(), Role::Customer);

    let mine = ledger
        .bookings
        .create_booking(ledger.guest, stay(package.uuid, &[], 2))
        .await?;
    ledger
        .bookings
        .create_booking(neighbour, stay(package.uuid, &[], 1))
        .await?;

    let listed = ledger.bookings.list_bookings(ledger.guest).await?;

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].uuid, mine.uuid);

    let peek = ledger.bookings.get_booking(neighbour, mine.uuid).await;

    assert!(
        matches!(peek, Err(BookingsServiceError::Forbidden)),
        "expected Forbidden, got {peek:?}"
    );

    let pay_for_other = ledger.payments.create_order(neighbour, mine.uuid).await;

    assert!(
        matches!(pay_for_other, Err(PaymentsServiceError::Forbidden)),
        "expected Forbidden, got {pay_for_other:?}"
    );

    assert_eq!(ledger.bookings.list_all_bookings(ledger.admin).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn booking_ids_stay_unique_across_a_busy_year() -> TestResult {
    let ledger = Ledger::new();
    let package = ledger.store.insert_package("Tea Estate Weekend", 5_000);

    for _ in 0..1_000 {
        ledger
            .bookings
            .create_booking(ledger.guest, stay(package.uuid, &[], 1))
            .await?;
    }

    let mut ids: Vec<String> = ledger
        .store
        .bookings()
        .into_iter()
        .map(|booking| booking.human_id)
        .collect();

    assert!(
        ids.iter().all(|id| id.starts_with("HH")),
        "unexpected id shape in {ids:?}"
    );

    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 1_000);

    Ok(())
}

fn flip_last_hex_digit(signature: &str) -> String {
    let mut chars: Vec<char> = signature.chars().collect();

    if let Some(last) = chars.last_mut() {
        *last = if *last == '0' { '1' } else { '0' };
    }

    chars.into_iter().collect()
}
