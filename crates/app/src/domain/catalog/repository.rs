//! Catalog Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::{RepositoryError, amount_from_column, amount_to_column},
    domain::catalog::{
        data::{NewActivity, NewPackage},
        records::{Activity, ActivityUuid, Package, PackageUuid},
    },
};

const LIST_PACKAGES_SQL: &str = include_str!("sql/list_packages.sql");
const GET_PACKAGE_SQL: &str = include_str!("sql/get_package.sql");
const CREATE_PACKAGE_SQL: &str = include_str!("sql/create_package.sql");
const LIST_ACTIVITIES_SQL: &str = include_str!("sql/list_activities.sql");
const GET_ACTIVITY_SQL: &str = include_str!("sql/get_activity.sql");
const FIND_ACTIVITIES_SQL: &str = include_str!("sql/find_activities.sql");
const CREATE_ACTIVITY_SQL: &str = include_str!("sql/create_activity.sql");

#[derive(Debug, Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_packages(&self) -> Result<Vec<Package>, RepositoryError> {
        Ok(query_as::<Postgres, Package>(LIST_PACKAGES_SQL)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_package(&self, package: PackageUuid) -> Result<Package, RepositoryError> {
        Ok(query_as::<Postgres, Package>(GET_PACKAGE_SQL)
            .bind(package.into_uuid())
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create_package(&self, package: NewPackage) -> Result<Package, RepositoryError> {
        Ok(query_as::<Postgres, Package>(CREATE_PACKAGE_SQL)
            .bind(package.uuid.into_uuid())
            .bind(&package.name)
            .bind(&package.description)
            .bind(&package.duration)
            .bind(amount_to_column("price", package.price)?)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn list_activities(&self) -> Result<Vec<Activity>, RepositoryError> {
        Ok(query_as::<Postgres, Activity>(LIST_ACTIVITIES_SQL)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_activity(&self, activity: ActivityUuid) -> Result<Activity, RepositoryError> {
        Ok(query_as::<Postgres, Activity>(GET_ACTIVITY_SQL)
            .bind(activity.into_uuid())
            .fetch_one(&self.pool)
            .await?)
    }

    #[tracing::instrument(
        name = "catalog.repository.find_activities",
        skip(self, activities),
        fields(requested = activities.len()),
        err
    )]
    async fn find_activities(
        &self,
        activities: &[ActivityUuid],
    ) -> Result<Vec<Activity>, RepositoryError> {
        if activities.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = activities.iter().map(|uuid| uuid.into_uuid()).collect();

        Ok(query_as::<Postgres, Activity>(FIND_ACTIVITIES_SQL)
            .bind(&uuids)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn create_activity(&self, activity: NewActivity) -> Result<Activity, RepositoryError> {
        Ok(query_as::<Postgres, Activity>(CREATE_ACTIVITY_SQL)
            .bind(activity.uuid.into_uuid())
            .bind(&activity.name)
            .bind(&activity.description)
            .bind(amount_to_column("price", activity.price)?)
            .fetch_one(&self.pool)
            .await?)
    }
}

impl<'r> FromRow<'r, PgRow> for Package {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PackageUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            duration: row.try_get("duration")?,
            price: amount_from_column("price", row.try_get("price")?)?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Activity {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ActivityUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: amount_from_column("price", row.try_get("price")?)?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[automock]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Active packages, cheapest first.
    async fn list_packages(&self) -> Result<Vec<Package>, RepositoryError>;

    /// A package regardless of its active flag.
    async fn get_package(&self, package: PackageUuid) -> Result<Package, RepositoryError>;

    async fn create_package(&self, package: NewPackage) -> Result<Package, RepositoryError>;

    /// Active activities by name.
    async fn list_activities(&self) -> Result<Vec<Activity>, RepositoryError>;

    /// An activity regardless of its active flag.
    async fn get_activity(&self, activity: ActivityUuid) -> Result<Activity, RepositoryError>;

    /// Every stored activity among `activities`, active or not. Unknown ids are skipped.
    async fn find_activities(
        &self,
        activities: &[ActivityUuid],
    ) -> Result<Vec<Activity>, RepositoryError>;

    async fn create_activity(&self, activity: NewActivity) -> Result<Activity, RepositoryError>;
}
