//! Create Product Handler

use std::{num::TryFromIntError, sync::Arc};

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use salessense_app::domain::catalog::{
    data::{NewProduct, NewVariant},
    records::{ProductUuid, VariantUuid},
};

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Display name
    pub name: String,

    /// Catalog category
    pub category: String,

    /// At least one variant is required
    pub variants: Vec<CreateVariantRequest>,
}

/// One variant of a new product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateVariantRequest {
    /// Pack size or other distinguishing label
    pub label: String,

    /// Unit price in minor units
    pub price: u64,

    /// Opening stock
    pub stock: u32,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = TryFromIntError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        let product = NewProduct {
            uuid: ProductUuid::new(),
            name: request.name,
            category: request.category,
            variants: request
                .variants
                .into_iter()
                .map(|variant| NewVariant {
                    uuid: VariantUuid::new(),
                    label: variant.label,
                    price: variant.price,
                    stock: variant.stock,
                })
                .collect(),
        };

        product.check_ranges()?;

        Ok(product)
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("staff_token" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid staff token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let new_product = NewProduct::try_from(json.into_inner())
        .or_400("Price or stock is out of range")?;

    let product = state
        .app
        .catalog
        .create_product(new_product)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
