//! Admin Payment Handlers

pub(crate) mod index;
