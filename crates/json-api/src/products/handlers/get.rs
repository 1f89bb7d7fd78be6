//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salessense_app::domain::catalog::records::{ProductRecord, VariantRecord};

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantResponse {
    /// The unique identifier of the variant
    pub uuid: Uuid,

    /// Pack size or other distinguishing label, e.g. "1kg"
    pub label: String,

    /// The price of one unit in minor units (paise/cents)
    pub price: u64,

    /// Units currently available
    pub stock: u32,
}

impl From<VariantRecord> for VariantResponse {
    fn from(variant: VariantRecord) -> Self {
        VariantResponse {
            uuid: variant.uuid.into(),
            label: variant.label,
            price: variant.price,
            stock: variant.stock,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Catalog category
    pub category: String,

    /// Purchasable variants in display order
    pub variants: Vec<VariantResponse>,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            category: product.category,
            variants: product.variants.into_iter().map(Into::into).collect(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product with live stock for each variant.
#[endpoint(tags("products"), summary = "Get Product")]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .catalog
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use salessense_app::domain::catalog::{
        CatalogServiceError, MockCatalogService, records::ProductUuid,
    };

    use crate::test_helpers::{
        AppMocks, make_product, make_variant, public_service, strict_catalog_mock,
    };

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        public_service(
            AppMocks {
                catalog,
                ..AppMocks::default()
            },
            Router::with_path("products/{product}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_returns_product_with_variants() -> TestResult {
        let uuid = ProductUuid::new();
        let product = make_product(
            uuid,
            vec![make_variant("1kg", 60_00, 4), make_variant("5kg", 280_00, 0)],
        );

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(product));

        catalog.expect_list_products().never();
        catalog.expect_create_product().never();
        catalog.expect_delete_product().never();

        let mut res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(catalog))
            .await;

        let body: ProductResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());

        let labels: Vec<&str> = body.variants.iter().map(|v| v.label.as_str()).collect();

        assert_eq!(labels, ["1kg", "5kg"]);
        assert_eq!(body.variants.get(1).map(|v| v.stock), Some(0));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let uuid = ProductUuid::new();

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Err(CatalogServiceError::NotFound));

        catalog.expect_list_products().never();
        catalog.expect_create_product().never();
        catalog.expect_delete_product().never();

        let res = TestClient::get(format!("http://example.com/products/{uuid}"))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_malformed_uuid_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/products/not-a-uuid")
            .send(&make_service(strict_catalog_mock()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
