//! Stable error kinds.
//!
//! Every error brief starts with a kind such as `insufficient_stock: ` so
//! clients can branch on it without parsing the message.

use std::fmt::Display;

use salvo::prelude::StatusError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    BadInput,
    EmptyCart,
    Unauthorized,
    NotFound,
    AlreadyExists,
    InsufficientStock,
    Conflict,
    Internal,
}

impl ErrorKind {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::BadInput => "bad_input",
            Self::EmptyCart => "empty_cart",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::AlreadyExists => "already_exists",
            Self::InsufficientStock => "insufficient_stock",
            Self::Conflict => "conflict",
            Self::Internal => "internal",
        }
    }

    /// Status error with the kind's status code and a `"{kind}: {message}"` brief.
    pub(crate) fn error(self, message: impl Display) -> StatusError {
        let status = match self {
            Self::BadInput | Self::EmptyCart => StatusError::bad_request(),
            Self::Unauthorized => StatusError::unauthorized(),
            Self::NotFound => StatusError::not_found(),
            Self::AlreadyExists | Self::InsufficientStock | Self::Conflict => {
                StatusError::conflict()
            }
            Self::Internal => StatusError::internal_server_error(),
        };

        status.brief(format!("{}: {message}", self.as_str()))
    }

    /// Internal error with a generic message; details belong in the logs.
    pub(crate) fn internal() -> StatusError {
        Self::Internal.error("Internal Server Error")
    }

    /// The kind a brief was built with, if any.
    #[cfg(test)]
    pub(crate) fn of(status: &StatusError) -> Option<&str> {
        status.brief.split_once(": ").map(|(kind, _message)| kind)
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn brief_is_prefixed_with_kind() {
        let status = ErrorKind::InsufficientStock.error("only 2 left");

        assert_eq!(status.code, StatusCode::CONFLICT);
        assert_eq!(status.brief, "insufficient_stock: only 2 left");
        assert_eq!(ErrorKind::of(&status), Some("insufficient_stock"));
    }

    #[test]
    fn kinds_map_to_statuses() {
        let cases = [
            (ErrorKind::BadInput, StatusCode::BAD_REQUEST),
            (ErrorKind::EmptyCart, StatusCode::BAD_REQUEST),
            (ErrorKind::Unauthorized, StatusCode::UNAUTHORIZED),
            (ErrorKind::NotFound, StatusCode::NOT_FOUND),
            (ErrorKind::AlreadyExists, StatusCode::CONFLICT),
            (ErrorKind::Conflict, StatusCode::CONFLICT),
            (ErrorKind::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (kind, expected) in cases {
            assert_eq!(kind.error("x").code, expected, "{kind:?}");
        }
    }

    #[test]
    fn internal_has_internal_kind() {
        assert_eq!(ErrorKind::of(&ErrorKind::internal()), Some("internal"));
    }
}
