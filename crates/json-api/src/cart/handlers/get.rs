//! View Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    cart::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// View Cart Handler
///
/// Returns the session's cart lines and total. Read-only.
#[endpoint(
    tags("cart"),
    summary = "View Cart",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(session.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::try_from(&cart)?))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use salessense_app::domain::{
        carts::{MockCartsService, models::Cart},
        catalog::records::ProductUuid,
    };

    use crate::test_helpers::{
        AppMocks, TEST_SESSION_UUID, make_product, make_variant, session_service,
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        session_service(
            AppMocks {
                carts,
                ..AppMocks::default()
            },
            Router::with_path("cart").get(handler),
        )
    }

    #[tokio::test]
    async fn test_view_empty_cart() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|session| *session == TEST_SESSION_UUID)
            .return_once(|_| Ok(Cart::default()));

        let response: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        assert!(response.lines.is_empty());
        assert_eq!(response.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_view_lists_lines_with_totals() -> TestResult {
        let small = make_variant("1kg", 10_00, 5);
        let large = make_variant("5kg", 5_00, 5);
        let rice = make_product(ProductUuid::new(), vec![small.clone(), large.clone()]);

        let mut cart = Cart::default();

        cart.add(&rice, small.uuid, 2)?;
        cart.add(&rice, large.uuid, 1)?;

        let expected_key = format!("{}_{}", rice.uuid, small.uuid);

        let mut carts = MockCartsService::new();

        carts.expect_get_cart().once().return_once(move |_| Ok(cart));

        let response: CartResponse = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await
            .take_json()
            .await?;

        let totals: Vec<u64> = response.lines.iter().map(|l| l.line_total).collect();

        assert_eq!(totals, [20_00, 5_00]);
        assert_eq!(response.total, 25_00);
        assert_eq!(response.lines.first().map(|l| l.key.as_str()), Some(expected_key.as_str()));

        Ok(())
    }
}
