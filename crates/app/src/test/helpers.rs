//! Test Helpers

use jiff::civil::date;

use crate::{
    domain::{
        bookings::{data::NewBooking, records::GuestDetails},
        catalog::{
            CatalogService, CatalogServiceError,
            data::{NewActivity, NewPackage},
            records::{Activity, ActivityUuid, Package, PackageUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_package(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<Package, CatalogServiceError> {
    ctx.catalog
        .create_package(NewPackage {
            uuid: PackageUuid::new(),
            name: name.to_string(),
            description: format!("{name} stay"),
            duration: "2 nights".to_string(),
            price,
        })
        .await
}

pub(crate) async fn create_activity(
    ctx: &TestContext,
    name: &str,
    price: u64,
) -> Result<Activity, CatalogServiceError> {
    ctx.catalog
        .create_activity(NewActivity {
            uuid: ActivityUuid::new(),
            name: name.to_string(),
            description: format!("{name} with a local guide"),
            price,
        })
        .await
}

/// Two-night stay request for two adults.
pub(crate) fn booking_request(package: PackageUuid, activities: &[ActivityUuid]) -> NewBooking {
    NewBooking {
        package,
        activity_ids: activities.iter().map(ToString::to_string).collect(),
        guest: GuestDetails {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
        },
        check_in: date(2026, 12, 24),
        check_out: date(2026, 12, 26),
        adults: 2,
        children: 0,
        special_requests: String::new(),
    }
}
