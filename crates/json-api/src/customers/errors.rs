//! Customer Errors

use salvo::http::StatusError;
use tracing::error;

use salessense_app::domain::customers::CustomersServiceError;

use crate::extensions::ErrorKind;

pub(crate) fn into_status_error(error: CustomersServiceError) -> StatusError {
    match error {
        CustomersServiceError::AlreadyExists => {
            ErrorKind::AlreadyExists.error("Email or mobile number already registered")
        }
        CustomersServiceError::NotFound => ErrorKind::NotFound.error("Customer not found"),
        CustomersServiceError::MissingRequiredData | CustomersServiceError::InvalidData => {
            ErrorKind::BadInput.error("Name, email and mobile number are required")
        }
        CustomersServiceError::Sql(source) => {
            error!("customer storage error: {source}");

            ErrorKind::internal()
        }
    }
}
