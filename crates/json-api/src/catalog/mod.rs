//! Catalog
//!
//! Public, read-only listing of bookable packages and add-on activities.

pub(crate) mod activities;
mod errors;
pub(crate) mod packages;
