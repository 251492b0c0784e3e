//! Catalog Data

use crate::domain::catalog::records::{ActivityUuid, PackageUuid};

/// New Package Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPackage {
    pub uuid: PackageUuid,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub price: u64,
}

/// New Activity Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewActivity {
    pub uuid: ActivityUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
}
