//! Payments
//!
//! One payment record per booking, opened against a gateway order and
//! completed once the gateway's callback signature checks out.

pub mod data;
pub mod errors;
pub mod gateway;
pub mod records;
mod repository;
pub mod service;

pub use errors::PaymentsServiceError;
pub use repository::{MockPaymentsRepository, PaymentsRepository, PgPaymentsRepository};
pub use service::*;
