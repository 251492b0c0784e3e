//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db, PoolSettings},
    domain::{
        bookings::{BookingsService, PgBookingsService},
        catalog::{CatalogService, PgCatalogService},
        payments::{
            PaymentsService, PgPaymentsService,
            gateway::{GatewayError, RazorpayConfig, RazorpayGateway},
        },
    },
    notifications::{LogNotifier, Notifier, NotifierError, SmtpConfig, SmtpNotifier},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to configure payment gateway")]
    Gateway(#[source] GatewayError),

    #[error("failed to configure mail transport")]
    Mail(#[source] NotifierError),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub bookings: Arc<dyn BookingsService>,
    pub payments: Arc<dyn PaymentsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL and external service settings.
    ///
    /// Without mail settings, confirmations are only logged.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or an
    /// external service is misconfigured.
    pub async fn from_database_url(
        url: &str,
        pool: PoolSettings,
        gateway: RazorpayConfig,
        mail: Option<SmtpConfig>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(url, pool)
            .await
            .map_err(AppInitError::Database)?;

        let gateway = RazorpayGateway::new(gateway).map_err(AppInitError::Gateway)?;

        let notifier: Arc<dyn Notifier> = match mail {
            Some(config) => Arc::new(SmtpNotifier::new(config).map_err(AppInitError::Mail)?),
            None => {
                info!("no mail transport configured, booking confirmations will only be logged");

                Arc::new(LogNotifier)
            }
        };

        let db = Db::new(pool.clone());

        Ok(Self {
            catalog: Arc::new(PgCatalogService::new(&db)),
            bookings: Arc::new(PgBookingsService::new(&db)),
            payments: Arc::new(PgPaymentsService::new(&db, Arc::new(gateway), notifier)),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
