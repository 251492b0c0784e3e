//! Shared state lookup.

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::state::State;

pub(crate) trait DepotExt {
    /// Server state injected by the root router; missing state is a wiring bug.
    fn app_state(&self) -> Result<&Arc<State>, StatusError>;
}

impl DepotExt for Depot {
    fn app_state(&self) -> Result<&Arc<State>, StatusError> {
        self.obtain::<Arc<State>>().map_err(|_ignored| {
            error!("server state missing from depot");

            StatusError::internal_server_error()
        })
    }
}
