//! Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    checkout::errors::{into_status_error, outcome},
    extensions::*,
    observability::{CheckoutOutcome, record_checkout},
    purchases::index::PurchaseResponse,
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    /// Free-form label such as "cash" or "upi"
    pub payment_method: String,
}

/// Receipt Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReceiptResponse {
    /// One purchase per cart line, in cart order
    pub purchases: Vec<PurchaseResponse>,

    /// Amount charged in minor units
    pub total: u64,
}

/// Checkout Handler
///
/// Commits every cart line as a purchase, decrementing stock, then empties
/// the cart. Nothing is committed if any line cannot be fulfilled.
#[endpoint(
    tags("checkout"),
    summary = "Check Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Purchases committed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or missing payment method"),
        (status_code = StatusCode::NOT_FOUND, description = "A product or variant is gone"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock for a line, or a concurrent checkout held it"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid or expired session"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReceiptResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    let receipt = match state
        .app
        .checkout
        .checkout(
            session.uuid,
            session.customer_uuid,
            json.into_inner().payment_method,
        )
        .await
    {
        Ok(receipt) => receipt,
        Err(error) => {
            record_checkout(outcome(&error));

            return Err(into_status_error(error));
        }
    };

    record_checkout(CheckoutOutcome::Completed);

    res.status_code(StatusCode::CREATED);

    Ok(Json(ReceiptResponse {
        purchases: receipt.purchases.into_iter().map(Into::into).collect(),
        total: receipt.total,
    }))
}
