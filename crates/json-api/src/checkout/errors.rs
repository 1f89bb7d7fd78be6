//! Checkout Errors

use salvo::http::StatusError;
use tracing::error;

use salessense_app::domain::checkout::CheckoutServiceError;

use crate::{
    extensions::ErrorKind, observability::CheckoutOutcome, sessions::errors as session_errors,
};

pub(crate) fn outcome(error: &CheckoutServiceError) -> CheckoutOutcome {
    match error {
        CheckoutServiceError::EmptyCart => CheckoutOutcome::EmptyCart,
        CheckoutServiceError::InsufficientStock { .. } | CheckoutServiceError::Contention => {
            CheckoutOutcome::InsufficientStock
        }
        CheckoutServiceError::InvalidPaymentMethod
        | CheckoutServiceError::ProductNotFound { .. }
        | CheckoutServiceError::VariantNotFound { .. }
        | CheckoutServiceError::AmountOverflow => CheckoutOutcome::Rejected,
        CheckoutServiceError::Sessions(_)
        | CheckoutServiceError::Catalog(_)
        | CheckoutServiceError::Purchases(_) => CheckoutOutcome::Failed,
    }
}

pub(crate) fn into_status_error(error: CheckoutServiceError) -> StatusError {
    match error {
        CheckoutServiceError::EmptyCart => {
            ErrorKind::EmptyCart.error("add items before checking out")
        }
        CheckoutServiceError::InvalidPaymentMethod => {
            ErrorKind::BadInput.error("Payment method is required")
        }
        CheckoutServiceError::AmountOverflow => {
            ErrorKind::BadInput.error("Checkout total is too large")
        }
        CheckoutServiceError::ProductNotFound { .. }
        | CheckoutServiceError::VariantNotFound { .. } => ErrorKind::NotFound.error(&error),
        CheckoutServiceError::InsufficientStock { .. } => {
            ErrorKind::InsufficientStock.error(&error)
        }
        CheckoutServiceError::Contention => ErrorKind::Conflict.error(&error),
        CheckoutServiceError::Sessions(error) => session_errors::into_status_error(error),
        CheckoutServiceError::Catalog(source) => {
            error!("failed to read catalog during checkout: {source}");

            ErrorKind::internal()
        }
        CheckoutServiceError::Purchases(source) => {
            error!("failed to commit purchases: {source}");

            ErrorKind::internal()
        }
    }
}
