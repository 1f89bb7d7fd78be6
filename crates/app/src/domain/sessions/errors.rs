//! Sessions service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::sessions::token::SessionTokenError;

#[derive(Debug, Error)]
pub enum SessionsServiceError {
    #[error("session not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("stored cart could not be encoded or decoded")]
    CartEncoding(#[from] serde_json::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for SessionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<SessionTokenError> for SessionsServiceError {
    fn from(_error: SessionTokenError) -> Self {
        Self::NotFound
    }
}
