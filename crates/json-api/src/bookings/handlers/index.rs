//! Booking Index Handler

use salvo::prelude::*;

use crate::{
    bookings::{errors::into_status_error, get::BookingResponse},
    envelope::Envelope,
    extensions::*,
};

/// Booking Index Handler
///
/// Returns the caller's bookings, newest first.
#[endpoint(
    tags("bookings"),
    summary = "List Bookings",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<BookingResponse>>>, StatusError> {
    let state = depot.app_state()?;
    let session = depot.session_or_401()?;

    let bookings = state
        .app
        .bookings
        .list_bookings(session)
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok(
        "Bookings retrieved",
        bookings.into_iter().map(Into::into).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use homestay_app::domain::bookings::{
        MockBookingsService,
        records::{BookingStatus, BookingUuid},
    };

    use crate::{
        bookings::tests::make_booking,
        test_helpers::{CUSTOMER, TestApp},
    };

    use super::*;

    fn make_service(bookings: MockBookingsService) -> Service {
        TestApp::new()
            .with_bookings(bookings)
            .service(Router::with_path("bookings").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_callers_bookings() -> TestResult {
        let newer = BookingUuid::new();
        let older = BookingUuid::new();

        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_bookings()
            .once()
            .withf(|session| *session == CUSTOMER)
            .return_once(move |_| {
                Ok(vec![
                    make_booking(newer, CUSTOMER, BookingStatus::Confirmed),
                    make_booking(older, CUSTOMER, BookingStatus::Cancelled),
                ])
            });

        let mut res = TestClient::get("http://example.com/bookings")
            .send(&make_service(bookings))
            .await;

        let body: Envelope<Vec<BookingResponse>> = res.take_json().await?;
        let statuses: Vec<_> = body.data.iter().map(|b| b.status.as_str()).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(statuses, vec!["confirmed", "cancelled"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_with_no_bookings_returns_empty_list() -> TestResult {
        let mut bookings = MockBookingsService::new();

        bookings
            .expect_list_bookings()
            .once()
            .return_once(|_| Ok(vec![]));

        let body: Envelope<Vec<BookingResponse>> = TestClient::get("http://example.com/bookings")
            .send(&make_service(bookings))
            .await
            .take_json()
            .await?;

        assert!(body.data.is_empty());

        Ok(())
    }
}
