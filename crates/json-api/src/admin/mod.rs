//! Admin
//!
//! Back-office routes. Mounted behind the admin guard.

pub(crate) mod bookings;
pub(crate) mod payments;
