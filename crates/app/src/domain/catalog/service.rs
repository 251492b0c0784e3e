//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        data::{NewActivity, NewPackage},
        errors::CatalogServiceError,
        records::{Activity, ActivityUuid, Package, PackageUuid},
        repository::{CatalogRepository, PgCatalogRepository},
    },
};

#[derive(Clone)]
pub struct PgCatalogService {
    repository: Arc<dyn CatalogRepository>,
}

impl std::fmt::Debug for PgCatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCatalogService").finish_non_exhaustive()
    }
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: &Db) -> Self {
        Self::with_repository(Arc::new(PgCatalogRepository::new(db.pool().clone())))
    }

    #[must_use]
    pub fn with_repository(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_packages(&self) -> Result<Vec<Package>, CatalogServiceError> {
        Ok(self.repository.list_packages().await?)
    }

    async fn get_package(&self, package: PackageUuid) -> Result<Package, CatalogServiceError> {
        Ok(self.repository.get_package(package).await?)
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, CatalogServiceError> {
        Ok(self.repository.list_activities().await?)
    }

    async fn get_activity(&self, activity: ActivityUuid) -> Result<Activity, CatalogServiceError> {
        Ok(self.repository.get_activity(activity).await?)
    }

    async fn create_package(&self, package: NewPackage) -> Result<Package, CatalogServiceError> {
        if package.name.trim().is_empty() || package.price == 0 {
            return Err(CatalogServiceError::InvalidData);
        }

        Ok(self.repository.create_package(package).await?)
    }

    async fn create_activity(
        &self,
        activity: NewActivity,
    ) -> Result<Activity, CatalogServiceError> {
        if activity.name.trim().is_empty() {
            return Err(CatalogServiceError::InvalidData);
        }

        Ok(self.repository.create_activity(activity).await?)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves all active packages.
    async fn list_packages(&self) -> Result<Vec<Package>, CatalogServiceError>;

    /// Retrieve a single package.
    async fn get_package(&self, package: PackageUuid) -> Result<Package, CatalogServiceError>;

    /// Retrieves all active activities.
    async fn list_activities(&self) -> Result<Vec<Activity>, CatalogServiceError>;

    /// Retrieve a single activity.
    async fn get_activity(&self, activity: ActivityUuid) -> Result<Activity, CatalogServiceError>;

    /// Adds a package to the catalog. Packages must carry a positive price.
    async fn create_package(&self, package: NewPackage) -> Result<Package, CatalogServiceError>;

    /// Adds an activity to the catalog. Free activities are allowed.
    async fn create_activity(&self, activity: NewActivity)
    -> Result<Activity, CatalogServiceError>;
}
