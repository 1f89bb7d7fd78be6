//! Purchases service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::catalog::records::{ProductUuid, VariantUuid};

#[derive(Debug, Error)]
pub enum PurchasesServiceError {
    #[error("purchase already exists")]
    AlreadyExists,

    #[error("purchase not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("variant {variant_uuid} of product {product_uuid} no longer exists")]
    VariantGone {
        product_uuid: ProductUuid,
        variant_uuid: VariantUuid,
    },

    #[error("variant {variant_uuid} of product {product_uuid} has only {available} left")]
    InsufficientStock {
        product_uuid: ProductUuid,
        variant_uuid: VariantUuid,
        available: u32,
    },

    /// Another transaction held the rows; the commit was rolled back.
    #[error("concurrent checkout conflict")]
    Contention,

    #[error("storage error")]
    Sql(#[source] Error),
}

/// `deadlock_detected` and `serialization_failure`.
const CONTENTION_CODES: [&str; 2] = ["40P01", "40001"];

impl From<Error> for PurchasesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        let contended = error
            .as_database_error()
            .and_then(DatabaseError::code)
            .is_some_and(|code| CONTENTION_CODES.iter().any(|c| *c == code));

        if contended {
            return Self::Contention;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{borrow::Cow, fmt};

    use super::*;

    #[derive(Debug)]
    struct CodedError(&'static str);

    impl fmt::Display for CodedError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "database error {}", self.0)
        }
    }

    impl std::error::Error for CodedError {}

    impl DatabaseError for CodedError {
        fn message(&self) -> &str {
            "database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    #[test]
    fn deadlock_maps_to_contention() {
        let error = PurchasesServiceError::from(Error::Database(Box::new(CodedError("40P01"))));

        assert!(
            matches!(error, PurchasesServiceError::Contention),
            "expected Contention, got {error:?}"
        );
    }

    #[test]
    fn serialization_failure_maps_to_contention() {
        let error = PurchasesServiceError::from(Error::Database(Box::new(CodedError("40001"))));

        assert!(
            matches!(error, PurchasesServiceError::Contention),
            "expected Contention, got {error:?}"
        );
    }

    #[test]
    fn other_database_errors_map_to_sql() {
        let error = PurchasesServiceError::from(Error::Database(Box::new(CodedError("XX000"))));

        assert!(
            matches!(error, PurchasesServiceError::Sql(_)),
            "expected Sql, got {error:?}"
        );
    }
}
