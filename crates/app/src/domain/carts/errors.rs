//! Carts service errors.

use thiserror::Error;

use crate::domain::{
    carts::models::CartError, catalog::CatalogServiceError, sessions::SessionsServiceError,
};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("no items selected")]
    NoItemsSelected,

    #[error("product not found")]
    ProductNotFound,

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("session error")]
    Sessions(#[from] SessionsServiceError),

    #[error("catalog error")]
    Catalog(#[source] CatalogServiceError),
}

impl From<CatalogServiceError> for CartsServiceError {
    fn from(error: CatalogServiceError) -> Self {
        match error {
            CatalogServiceError::NotFound => Self::ProductNotFound,
            error => Self::Catalog(error),
        }
    }
}
