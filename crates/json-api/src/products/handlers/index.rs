//! Product Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, products::get::ProductResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The list of products
    pub products: Vec<ProductResponse>,
}

/// Product Index Handler
///
/// Lists every product that has not been deleted, oldest first.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .catalog
        .list_products()
        .await
        .or_500("failed to fetch products")?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use salessense_app::domain::catalog::{
        CatalogServiceError, MockCatalogService, records::ProductUuid,
    };

    use crate::test_helpers::{AppMocks, make_product, make_variant, public_service};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        public_service(
            AppMocks {
                catalog,
                ..AppMocks::default()
            },
            Router::with_path("products").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_products()
            .once()
            .return_once(|| Ok(vec![]));

        catalog.expect_get_product().never();
        catalog.expect_create_product().never();
        catalog.expect_delete_product().never();

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let response: ProductsResponse = res.take_json().await?;

        assert!(response.products.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_returns_products_in_order() -> TestResult {
        let uuid_a = ProductUuid::new();
        let uuid_b = ProductUuid::new();

        let mut catalog = MockCatalogService::new();

        catalog.expect_list_products().once().return_once(move || {
            Ok(vec![
                make_product(uuid_a, vec![make_variant("1kg", 60_00, 10)]),
                make_product(uuid_b, vec![make_variant("500g", 32_00, 3)]),
            ])
        });

        catalog.expect_get_product().never();
        catalog.expect_create_product().never();
        catalog.expect_delete_product().never();

        let response: ProductsResponse = TestClient::get("http://example.com/products")
            .send(&make_service(catalog))
            .await
            .take_json()
            .await?;

        let uuids: Vec<_> = response.products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, [uuid_a.into_uuid(), uuid_b.into_uuid()]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_products()
            .once()
            .return_once(|| Err(CatalogServiceError::InvalidData));

        catalog.expect_get_product().never();
        catalog.expect_create_product().never();
        catalog.expect_delete_product().never();

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
