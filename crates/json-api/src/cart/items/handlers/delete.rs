//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use salessense_app::domain::carts::models::CartKey;

use crate::{
    cart::{errors::into_status_error, models::CartSummaryResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Removing a line that is not in the cart succeeds and leaves the cart as
/// it was.
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart after removal"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed line key"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid or expired session"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    key: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartSummaryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    let key = key
        .into_inner()
        .parse::<CartKey>()
        .or_400("line key must be {product_uuid}_{variant_uuid}")?;

    let summary = state
        .app
        .carts
        .remove_item(session.uuid, key)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}
