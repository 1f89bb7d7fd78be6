//! Add Cart Items Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use salessense_app::domain::carts::data::NewCartLine;

use crate::{
    cart::{errors::into_status_error, models::CartSummaryResponse},
    extensions::*,
    state::State,
};

/// One variant selection.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemRequest {
    pub product_uuid: Uuid,
    pub variant_uuid: Uuid,
    pub quantity: u32,
}

impl From<CartItemRequest> for NewCartLine {
    fn from(item: CartItemRequest) -> Self {
        NewCartLine {
            product_uuid: item.product_uuid.into(),
            variant_uuid: item.variant_uuid.into(),
            quantity: item.quantity,
        }
    }
}

/// Add Cart Items Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemsRequest {
    /// Applied in order; if any selection fails none are added
    pub items: Vec<CartItemRequest>,
}

/// Add Cart Items Handler
#[endpoint(
    tags("cart"),
    summary = "Add Items to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Items added"),
        (status_code = StatusCode::BAD_REQUEST, description = "No items or invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Product or variant not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid or expired session"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemsRequest>,
    depot: &mut Depot,
) -> Result<Json<CartSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    let lines: Vec<NewCartLine> = json.into_inner().items.into_iter().map(Into::into).collect();
    let selected = lines.len();

    let summary = state
        .app
        .carts
        .add_items(session.uuid, lines)
        .await
        .map_err(into_status_error)?;

    info!(
        session_uuid = %session.uuid,
        selected,
        line_count = summary.line_count,
        total = summary.total,
        "added items to cart"
    );

    Ok(Json(summary.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use salessense_app::domain::{
        carts::{
            CartsServiceError, MockCartsService,
            models::{CartError, CartSummary},
        },
        catalog::records::{ProductUuid, VariantUuid},
    };

    use crate::test_helpers::{AppMocks, TEST_SESSION_UUID, session_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        session_service(
            AppMocks {
                carts,
                ..AppMocks::default()
            },
            Router::with_path("cart/items").post(handler),
        )
    }

    #[tokio::test]
    async fn test_add_items_returns_summary() -> TestResult {
        let product = ProductUuid::new();
        let small = VariantUuid::new();
        let large = VariantUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_items()
            .once()
            .withf(move |session, lines| {
                *session == TEST_SESSION_UUID
                    && *lines
                        == [
                            NewCartLine {
                                product_uuid: product,
                                variant_uuid: small,
                                quantity: 2,
                            },
                            NewCartLine {
                                product_uuid: product,
                                variant_uuid: large,
                                quantity: 1,
                            },
                        ]
            })
            .return_once(|_, _| {
                Ok(CartSummary {
                    total: 25_00,
                    line_count: 2,
                })
            });

        let mut res = TestClient::post("http://example.com/cart/items")
            .json(&json!({
                "items": [
                    { "product_uuid": product, "variant_uuid": small, "quantity": 2 },
                    { "product_uuid": product, "variant_uuid": large, "quantity": 1 }
                ]
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartSummaryResponse = res.take_json().await?;

        assert_eq!(body.total, 25_00);
        assert_eq!(body.line_count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_insufficient_stock_returns_409() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_add_items().once().return_once(|_, _| {
            Err(CartsServiceError::Cart(CartError::InsufficientStock {
                product_name: "Ponni Rice".to_string(),
                variant_label: "1kg".to_string(),
                requested: 4,
                available: 3,
            }))
        });

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({
                "items": [{
                    "product_uuid": ProductUuid::new(),
                    "variant_uuid": VariantUuid::new(),
                    "quantity": 4
                }]
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_selection_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_items()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NoItemsSelected));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "items": [] }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_items()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ProductNotFound));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({
                "items": [{
                    "product_uuid": ProductUuid::new(),
                    "variant_uuid": VariantUuid::new(),
                    "quantity": 1
                }]
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
