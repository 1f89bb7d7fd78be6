//! Staff token middleware for product management.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::warn;

use crate::{
    auth::{STAFF_TOKEN_HEADER, extract_bearer_token},
    extensions::ErrorKind,
    state::State,
};

/// Accepts the staff token from `x-staff-token` or an `Authorization:
/// Bearer` header.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Ok(state) = depot.obtain::<Arc<State>>() else {
        res.render(ErrorKind::internal());
        ctrl.skip_rest();

        return;
    };

    let authorized = req
        .headers()
        .get(STAFF_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .or_else(|| extract_bearer_token(req))
        .map(|token| state.is_staff_token(token));

    match authorized {
        Some(true) => {
            ctrl.call_next(req, depot, res).await;
        }
        Some(false) => {
            warn!(path = %req.uri().path(), "rejected staff request with wrong token");

            res.render(ErrorKind::Unauthorized.error("Invalid staff token"));
            ctrl.skip_rest();
        }
        None => {
            res.render(ErrorKind::Unauthorized.error("Missing staff token"));
            ctrl.skip_rest();
        }
    }
}
