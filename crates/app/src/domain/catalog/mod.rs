//! Catalog
//!
//! Packages and activities offered to guests. Read-only to the booking flow.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub use repository::{CatalogRepository, MockCatalogRepository, PgCatalogRepository};
pub use service::*;
