//! Cart response bodies.

use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salessense_app::domain::carts::models::{Cart, CartLine, CartSummary};

use crate::{cart::errors::cart_status_error, extensions::ErrorKind};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    /// Line key, `{product_uuid}_{variant_uuid}`; used to remove the line
    pub key: String,
    pub product_uuid: Uuid,
    pub variant_uuid: Uuid,
    pub product_name: String,
    pub variant_label: String,

    /// Unit price captured when the line was first added
    pub unit_price: u64,
    pub quantity: u32,
    pub line_total: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// Lines in the order they were first added
    pub lines: Vec<CartLineResponse>,

    /// Sum of line totals in minor units
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartSummaryResponse {
    pub total: u64,
    pub line_count: usize,
}

impl From<CartSummary> for CartSummaryResponse {
    fn from(summary: CartSummary) -> Self {
        CartSummaryResponse {
            total: summary.total,
            line_count: summary.line_count,
        }
    }
}

fn line_response(line: &CartLine, line_total: u64) -> CartLineResponse {
    CartLineResponse {
        key: line.key.to_string(),
        product_uuid: line.key.product_uuid.into(),
        variant_uuid: line.key.variant_uuid.into(),
        product_name: line.product_name.clone(),
        variant_label: line.variant_label.clone(),
        unit_price: line.unit_price,
        quantity: line.quantity,
        line_total,
    }
}

impl TryFrom<&Cart> for CartResponse {
    type Error = StatusError;

    fn try_from(cart: &Cart) -> Result<Self, Self::Error> {
        let total = cart.total().map_err(cart_status_error)?;

        let lines: Vec<CartLineResponse> = cart
            .lines()
            .iter()
            .map(|line| {
                line.line_total()
                    .map(|line_total| line_response(line, line_total))
                    .ok_or_else(|| ErrorKind::BadInput.error("Cart total is too large"))
            })
            .collect::<Result<_, StatusError>>()?;

        Ok(CartResponse { lines, total })
    }
}
