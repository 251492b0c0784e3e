//! App Router

use salvo::Router;

use crate::{
    admin, auth, bookings,
    catalog::{activities, packages},
    healthcheck,
    observability::metrics_handler,
    payments,
};

/// Every route the server answers. Catalog, health and metrics are public;
/// everything else needs a bearer token, and `/admin` an admin one.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(
            Router::with_path("packages")
                .get(packages::index::handler)
                .push(Router::with_path("{package}").get(packages::get::handler)),
        )
        .push(
            Router::with_path("activities")
                .get(activities::index::handler)
                .push(Router::with_path("{activity}").get(activities::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("bookings")
                        .get(bookings::index::handler)
                        .post(bookings::create::handler)
                        .push(
                            Router::with_path("{booking}")
                                .get(bookings::get::handler)
                                .push(Router::with_path("cancel").put(bookings::cancel::handler)),
                        ),
                )
                .push(
                    Router::with_path("payments")
                        .get(payments::index::handler)
                        .push(Router::with_path("create-order").post(payments::create_order::handler))
                        .push(Router::with_path("verify").post(payments::verify::handler))
                        .push(Router::with_path("{payment}").get(payments::get::handler)),
                )
                .push(
                    Router::with_path("admin")
                        .hoop(auth::middleware::require_admin)
                        .push(
                            Router::with_path("bookings")
                                .get(admin::bookings::index::handler)
                                .push(
                                    Router::with_path("{booking}/status")
                                        .put(admin::bookings::status::handler),
                                ),
                        )
                        .push(Router::with_path("payments").get(admin::payments::index::handler)),
                ),
        )
}
