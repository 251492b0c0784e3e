//! Shared test infrastructure.

pub(crate) mod helpers;
mod scenarios;

pub(crate) use context::{GATEWAY_SECRET, TestContext};
