//! Authentication
//!
//! Customers authenticate with the bearer token issued when their session
//! was opened. Product management is gated by a separate staff token.

pub(crate) mod middleware;
pub(crate) mod staff;

use salvo::{
    Request,
    http::header::{AUTHORIZATION, HeaderName},
};

pub(crate) const STAFF_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-staff-token");

pub(crate) fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
