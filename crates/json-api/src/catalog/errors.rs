//! Catalog Errors

use salvo::http::StatusError;
use tracing::error;

use homestay_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::NotFound => StatusError::not_found().brief("Catalog entry not found"),
        CatalogServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid catalog data")
        }
        CatalogServiceError::AlreadyExists => {
            StatusError::conflict().brief("Catalog entry already exists")
        }
        CatalogServiceError::Storage(source) => {
            error!("failed to read catalog: {source}");

            StatusError::internal_server_error()
        }
    }
}
