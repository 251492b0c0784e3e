//! Activity Index Handler

use salvo::prelude::*;

use crate::{
    catalog::{activities::get::ActivityResponse, errors::into_status_error},
    envelope::Envelope,
    extensions::*,
};

/// Activity Index Handler
///
/// Returns the active add-on activities.
#[endpoint(tags("catalog"), summary = "List Activities")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<ActivityResponse>>>, StatusError> {
    let state = depot.app_state()?;

    let activities = state
        .app
        .catalog
        .list_activities()
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok(
        "Activities retrieved",
        activities.into_iter().map(Into::into).collect(),
    ))
}
