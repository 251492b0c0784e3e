//! Catalog Records

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Package UUID
pub type PackageUuid = TypedUuid<Package>;

/// Activity UUID
pub type ActivityUuid = TypedUuid<Activity>;

/// Stay package, priced per adult.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    pub uuid: PackageUuid,
    pub name: String,
    pub description: String,
    pub duration: String,
    pub price: u64,
    /// `None` for records created before the flag existed.
    pub is_active: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Package {
    /// Packages without an explicit flag are treated as active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

/// Optional add-on activity, priced per adult.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub uuid: ActivityUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    /// `None` for records created before the flag existed.
    pub is_active: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Activity {
    /// Activities without an explicit flag are treated as active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}
