//! Session Errors

use salvo::http::StatusError;
use tracing::error;

use salessense_app::domain::sessions::SessionsServiceError;

use crate::extensions::ErrorKind;

pub(crate) fn into_status_error(error: SessionsServiceError) -> StatusError {
    match error {
        SessionsServiceError::NotFound => ErrorKind::Unauthorized.error("Invalid or expired session"),
        SessionsServiceError::InvalidReference => ErrorKind::NotFound.error("Customer not found"),
        SessionsServiceError::CartEncoding(source) => {
            error!("stored cart could not be read or written: {source}");

            ErrorKind::internal()
        }
        SessionsServiceError::Sql(source) => {
            error!("session storage error: {source}");

            ErrorKind::internal()
        }
    }
}
