//! Get Activity Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use homestay_app::domain::catalog::records::Activity;

use crate::{catalog::errors::into_status_error, envelope::Envelope, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ActivityResponse {
    /// The unique identifier of the activity
    pub id: Uuid,

    pub name: String,

    pub description: String,

    /// Price per adult in paise
    pub price: u64,

    pub is_active: bool,

    pub created_at: String,

    pub updated_at: String,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        ActivityResponse {
            id: activity.uuid.into(),
            is_active: activity.is_active(),
            name: activity.name,
            description: activity.description,
            price: activity.price,
            created_at: activity.created_at.to_string(),
            updated_at: activity.updated_at.to_string(),
        }
    }
}

/// Get Activity Handler
#[endpoint(tags("catalog"), summary = "Get Activity")]
pub(crate) async fn handler(
    activity: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<ActivityResponse>>, StatusError> {
    let state = depot.app_state()?;

    let activity = state
        .app
        .catalog
        .get_activity(activity.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok("Activity retrieved", activity.into()))
}
