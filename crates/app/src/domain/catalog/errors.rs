//! Catalog service errors.

use thiserror::Error;

use crate::database::RepositoryError;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("catalog entry not found")]
    NotFound,

    #[error("catalog entry already exists")]
    AlreadyExists,

    #[error("invalid catalog data")]
    InvalidData,

    #[error("storage error")]
    Storage(#[source] RepositoryError),
}

impl From<RepositoryError> for CatalogServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::AlreadyExists => Self::AlreadyExists,
            RepositoryError::InvalidData | RepositoryError::MissingRequiredData => {
                Self::InvalidData
            }
            other => Self::Storage(other),
        }
    }
}
