//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use salessense_app::domain::carts::{CartsServiceError, models::CartError};

use crate::{extensions::ErrorKind, sessions::errors as session_errors};

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NoItemsSelected => ErrorKind::BadInput.error("Select at least one variant"),
        CartsServiceError::ProductNotFound => ErrorKind::NotFound.error("Product not found"),
        CartsServiceError::Cart(error) => cart_status_error(error),
        CartsServiceError::Sessions(error) => session_errors::into_status_error(error),
        CartsServiceError::Catalog(source) => {
            error!("failed to read catalog for cart: {source}");

            ErrorKind::internal()
        }
    }
}

pub(crate) fn cart_status_error(error: CartError) -> StatusError {
    match error {
        CartError::InvalidQuantity => ErrorKind::BadInput.error("Quantity must be at least 1"),
        CartError::VariantNotFound => ErrorKind::NotFound.error("Variant not found"),
        CartError::InsufficientStock { .. } => ErrorKind::InsufficientStock.error(&error),
        CartError::AmountOverflow => ErrorKind::BadInput.error("Cart total is too large"),
    }
}
