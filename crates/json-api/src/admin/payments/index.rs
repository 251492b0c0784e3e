//! Admin Payment Index Handler

use salvo::prelude::*;

use crate::{
    envelope::Envelope,
    extensions::*,
    payments::{errors::into_status_error, get::PaymentResponse},
};

/// Admin Payment Index Handler
///
/// Returns every payment, newest first.
#[endpoint(
    tags("admin"),
    summary = "List All Payments",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<PaymentResponse>>>, StatusError> {
    let state = depot.app_state()?;
    let session = depot.session_or_401()?;

    let payments = state
        .app
        .payments
        .list_all_payments(session)
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok(
        "Payments retrieved",
        payments.into_iter().map(Into::into).collect(),
    ))
}
