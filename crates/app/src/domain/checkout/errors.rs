//! Checkout service errors.

use thiserror::Error;

use crate::domain::{
    catalog::CatalogServiceError, purchases::PurchasesServiceError,
    sessions::SessionsServiceError,
};

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("payment method is required")]
    InvalidPaymentMethod,

    #[error("product {product_name} not found")]
    ProductNotFound { product_name: String },

    #[error("{product_name} ({variant_label}) is no longer available")]
    VariantNotFound {
        product_name: String,
        variant_label: String,
    },

    #[error("not enough stock for {product_name} ({variant_label}): {available} available, {requested} requested")]
    InsufficientStock {
        product_name: String,
        variant_label: String,
        requested: u32,
        available: u32,
    },

    #[error("another checkout took the same items; try again")]
    Contention,

    #[error("checkout total overflowed")]
    AmountOverflow,

    #[error("session error")]
    Sessions(#[from] SessionsServiceError),

    #[error("catalog error")]
    Catalog(#[from] CatalogServiceError),

    #[error("purchases error")]
    Purchases(#[from] PurchasesServiceError),
}
