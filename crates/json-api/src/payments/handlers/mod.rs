//! Payment Handlers

pub(crate) mod create_order;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod verify;
