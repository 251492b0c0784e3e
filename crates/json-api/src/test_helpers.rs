//! Test helpers.

use std::sync::Arc;

use homestay_app::{
    auth::{MockAuthService, Role, Session, UserUuid},
    context::AppContext,
    domain::{
        bookings::MockBookingsService, catalog::MockCatalogService, payments::MockPaymentsService,
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{envelope, extensions::*, state::State};

pub(crate) const CUSTOMER: Session =
    Session::new(UserUuid::from_uuid(Uuid::from_u128(1)), Role::Customer);

pub(crate) const ADMIN: Session =
    Session::new(UserUuid::from_uuid(Uuid::from_u128(2)), Role::Admin);

/// Stand-in for the auth middleware.
struct InjectSession(Session);

#[handler]
impl InjectSession {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_session(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

/// Mocked services behind a router, signed in as [`CUSTOMER`] unless told
/// otherwise.
pub(crate) struct TestApp {
    catalog: MockCatalogService,
    bookings: MockBookingsService,
    payments: MockPaymentsService,
    auth: MockAuthService,
    session: Option<Session>,
}

impl TestApp {
    pub(crate) fn new() -> Self {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        Self {
            catalog: MockCatalogService::new(),
            bookings: MockBookingsService::new(),
            payments: MockPaymentsService::new(),
            auth,
            session: Some(CUSTOMER),
        }
    }

    pub(crate) fn with_catalog(mut self, catalog: MockCatalogService) -> Self {
        self.catalog = catalog;
        self
    }

    pub(crate) fn with_bookings(mut self, bookings: MockBookingsService) -> Self {
        self.bookings = bookings;
        self
    }

    pub(crate) fn with_payments(mut self, payments: MockPaymentsService) -> Self {
        self.payments = payments;
        self
    }

    pub(crate) fn with_auth(mut self, auth: MockAuthService) -> Self {
        self.auth = auth;
        self
    }

    pub(crate) fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub(crate) fn anonymous(mut self) -> Self {
        self.session = None;
        self
    }

    pub(crate) fn service(self, route: Router) -> Service {
        let state = State::from_app_context(AppContext {
            catalog: Arc::new(self.catalog),
            bookings: Arc::new(self.bookings),
            payments: Arc::new(self.payments),
            auth: Arc::new(self.auth),
        });

        let mut router = Router::new().hoop(inject(state));

        if let Some(session) = self.session {
            router = router.hoop(InjectSession(session));
        }

        envelope::service(router.push(route))
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        catalog: Arc::new(MockCatalogService::new()),
        bookings: Arc::new(MockBookingsService::new()),
        payments: Arc::new(MockPaymentsService::new()),
        auth: Arc::new(auth),
    })
}
