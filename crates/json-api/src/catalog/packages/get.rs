//! Get Package Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use homestay_app::domain::catalog::records::Package;

use crate::{catalog::errors::into_status_error, envelope::Envelope, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PackageResponse {
    /// The unique identifier of the package
    pub id: Uuid,

    pub name: String,

    pub description: String,

    /// Human readable length of stay, e.g. "3 nights"
    pub duration: String,

    /// Price per adult in paise
    pub price: u64,

    pub is_active: bool,

    pub created_at: String,

    pub updated_at: String,
}

impl From<Package> for PackageResponse {
    fn from(package: Package) -> Self {
        PackageResponse {
            id: package.uuid.into(),
            is_active: package.is_active(),
            name: package.name,
            description: package.description,
            duration: package.duration,
            price: package.price,
            created_at: package.created_at.to_string(),
            updated_at: package.updated_at.to_string(),
        }
    }
}

/// Get Package Handler
///
/// Returns a single package, active or not.
#[endpoint(tags("catalog"), summary = "Get Package")]
pub(crate) async fn handler(
    package: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<PackageResponse>>, StatusError> {
    let state = depot.app_state()?;

    let package = state
        .app
        .catalog
        .get_package(package.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok("Package retrieved", package.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use homestay_app::domain::catalog::{
        CatalogServiceError, MockCatalogService, records::PackageUuid,
    };

    use crate::{
        catalog::packages::tests::make_package, envelope::ErrorBody, test_helpers::TestApp,
    };

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        TestApp::new()
            .anonymous()
            .with_catalog(catalog)
            .service(Router::with_path("packages/{package}").get(handler))
    }

    #[tokio::test]
    async fn test_get_package_returns_package() -> TestResult {
        let uuid = PackageUuid::new();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_package()
            .once()
            .withf(move |package| *package == uuid)
            .return_once(move |_| Ok(make_package(uuid, 500_000)));

        let mut res = TestClient::get(format!("http://example.com/packages/{uuid}"))
            .send(&make_service(catalog))
            .await;

        let body: Envelope<PackageResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.success, "expected success envelope");
        assert_eq!(body.data.id, uuid.into_uuid());
        assert_eq!(body.data.price, 500_000);
        assert!(body.data.is_active, "absent flag reads as active");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_package_returns_404() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_package()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        let mut res = TestClient::get(format!("http://example.com/packages/{}", Uuid::nil()))
            .send(&make_service(catalog))
            .await;

        let body: ErrorBody = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Catalog entry not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_package_with_malformed_id_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_get_package().never();

        let res = TestClient::get("http://example.com/packages/not-a-uuid")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
