//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use salessense_app::domain::catalog::CatalogServiceError;

use crate::extensions::ErrorKind;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::AlreadyExists => {
            ErrorKind::AlreadyExists.error("Product already exists")
        }
        CatalogServiceError::NotFound => ErrorKind::NotFound.error("Product not found"),
        CatalogServiceError::InvalidReference
        | CatalogServiceError::MissingRequiredData
        | CatalogServiceError::InvalidData => ErrorKind::BadInput.error("Invalid product payload"),
        CatalogServiceError::InvalidNumber(_) => {
            ErrorKind::BadInput.error("Price or stock is out of range")
        }
        CatalogServiceError::InsufficientStock { available } => {
            ErrorKind::InsufficientStock.error(format!("Only {available} left in stock"))
        }
        CatalogServiceError::Sql(source) => {
            error!("catalog storage error: {source}");

            ErrorKind::internal()
        }
    }
}
