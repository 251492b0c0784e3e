//! Package Index Handler

use salvo::prelude::*;

use crate::{
    catalog::{errors::into_status_error, packages::get::PackageResponse},
    envelope::Envelope,
    extensions::*,
};

/// Package Index Handler
///
/// Returns the active packages.
#[endpoint(tags("catalog"), summary = "List Packages")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<PackageResponse>>>, StatusError> {
    let state = depot.app_state()?;

    let packages = state
        .app
        .catalog
        .list_packages()
        .await
        .map_err(into_status_error)?;

    Ok(Envelope::ok(
        "Packages retrieved",
        packages.into_iter().map(Into::into).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use homestay_app::{
        database::RepositoryError,
        domain::catalog::{CatalogServiceError, MockCatalogService, records::PackageUuid},
    };

    use crate::{catalog::packages::tests::make_package, test_helpers::TestApp};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        TestApp::new()
            .anonymous()
            .with_catalog(catalog)
            .service(Router::with_path("packages").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_packages_in_service_order() -> TestResult {
        let first = PackageUuid::new();
        let second = PackageUuid::new();

        let mut catalog = MockCatalogService::new();

        catalog.expect_list_packages().once().return_once(move || {
            Ok(vec![
                make_package(first, 500_000),
                make_package(second, 750_000),
            ])
        });

        let mut res = TestClient::get("http://example.com/packages")
            .send(&make_service(catalog))
            .await;

        let body: Envelope<Vec<PackageResponse>> = res.take_json().await?;
        let ids: Vec<_> = body.data.iter().map(|package| package.id).collect();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(ids, vec![first.into_uuid(), second.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_packages()
            .once()
            .return_once(|| Err(CatalogServiceError::Storage(RepositoryError::Conflict)));

        let res = TestClient::get("http://example.com/packages")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
