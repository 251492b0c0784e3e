//! Booking Handlers

pub(crate) mod cancel;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::{Timestamp, civil::date};

    use homestay_app::{
        auth::Session,
        domain::{
            bookings::records::{
                BookedActivity, BookedPackage, BookingRecord, BookingStatus, BookingUuid,
                GuestDetails,
            },
            catalog::records::{ActivityUuid, PackageUuid},
        },
    };

    pub(crate) fn make_booking(
        uuid: BookingUuid,
        owner: Session,
        status: BookingStatus,
    ) -> BookingRecord {
        BookingRecord {
            uuid,
            human_id: "HH2026-0001-12345678".to_string(),
            user_uuid: owner.user,
            package: BookedPackage {
                uuid: PackageUuid::new(),
                name: "Monsoon Retreat".to_string(),
            },
            activities: vec![BookedActivity {
                uuid: ActivityUuid::new(),
                name: "Kayaking".to_string(),
                price: 1_000,
            }],
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
            package_amount: 10_000,
            activities_amount: 2_000,
            total_amount: 12_000,
            status,
            payment_uuid: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
