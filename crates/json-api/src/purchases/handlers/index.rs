//! Purchase History Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salessense_app::domain::purchases::records::PurchaseRecord;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchaseResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub product_name: String,
    pub variant_uuid: Uuid,
    pub variant_label: String,
    pub quantity: u32,

    /// Unit price charged, in minor units
    pub unit_price: u64,
    pub total: u64,
    pub payment_method: String,
    pub purchased_at: String,
}

impl From<PurchaseRecord> for PurchaseResponse {
    fn from(purchase: PurchaseRecord) -> Self {
        PurchaseResponse {
            uuid: purchase.uuid.into(),
            product_uuid: purchase.product_uuid.into(),
            product_name: purchase.product_name,
            variant_uuid: purchase.variant_uuid.into(),
            variant_label: purchase.variant_label,
            quantity: purchase.quantity,
            unit_price: purchase.unit_price,
            total: purchase.total,
            payment_method: purchase.payment_method,
            purchased_at: purchase.purchased_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PurchasesResponse {
    /// Newest first
    pub purchases: Vec<PurchaseResponse>,
}

/// Purchase History Handler
#[endpoint(
    tags("purchases"),
    summary = "List Purchases",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PurchasesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    let purchases = state
        .app
        .purchases
        .list_purchases(session.customer_uuid)
        .await
        .or_500("failed to fetch purchases")?;

    Ok(Json(PurchasesResponse {
        purchases: purchases.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use salessense_app::domain::{
        catalog::records::{ProductUuid, VariantUuid},
        purchases::{MockPurchasesService, PurchasesServiceError, records::PurchaseUuid},
    };

    use crate::test_helpers::{AppMocks, TEST_CUSTOMER_UUID, session_service};

    use super::*;

    fn make_service(purchases: MockPurchasesService) -> Service {
        session_service(
            AppMocks {
                purchases,
                ..AppMocks::default()
            },
            Router::with_path("purchases").get(handler),
        )
    }

    #[tokio::test]
    async fn test_lists_current_customers_purchases() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_list_purchases()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER_UUID)
            .return_once(|customer_uuid| {
                Ok(vec![PurchaseRecord {
                    uuid: PurchaseUuid::new(),
                    customer_uuid,
                    product_uuid: ProductUuid::new(),
                    product_name: "Toor Dal".to_string(),
                    variant_uuid: VariantUuid::new(),
                    variant_label: "500g".to_string(),
                    quantity: 2,
                    unit_price: 75_00,
                    total: 150_00,
                    payment_method: "upi".to_string(),
                    purchased_at: Timestamp::UNIX_EPOCH,
                }])
            });

        purchases.expect_record_purchases().never();

        let response: PurchasesResponse = TestClient::get("http://example.com/purchases")
            .send(&make_service(purchases))
            .await
            .take_json()
            .await?;

        let totals: Vec<u64> = response.purchases.iter().map(|p| p.total).collect();

        assert_eq!(totals, [150_00]);

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_error_returns_500() -> TestResult {
        let mut purchases = MockPurchasesService::new();

        purchases
            .expect_list_purchases()
            .once()
            .return_once(|_| Err(PurchasesServiceError::InvalidData));

        let res = TestClient::get("http://example.com/purchases")
            .send(&make_service(purchases))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
