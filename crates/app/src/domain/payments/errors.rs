//! Payments service errors.

use thiserror::Error;

use crate::{database::RepositoryError, domain::payments::gateway::GatewayError};

#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    #[error("booking not found")]
    BookingNotFound,

    #[error("payment not found")]
    PaymentNotFound,

    #[error("not allowed to access this payment")]
    Forbidden,

    #[error("booking has no payable amount")]
    InvalidAmount,

    #[error("booking can no longer be paid")]
    InvalidState,

    #[error("booking is already paid")]
    AlreadyPaid,

    #[error("payment verification failed")]
    SignatureMismatch,

    #[error("payment gateway error")]
    Gateway(#[source] GatewayError),

    #[error("payment was modified concurrently")]
    Conflict,

    #[error("could not allocate a unique payment id")]
    IdentifierCollision,

    #[error("storage error")]
    Storage(#[source] RepositoryError),
}

impl From<RepositoryError> for PaymentsServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Conflict => Self::Conflict,
            other => Self::Storage(other),
        }
    }
}

impl From<GatewayError> for PaymentsServiceError {
    fn from(error: GatewayError) -> Self {
        Self::Gateway(error)
    }
}
