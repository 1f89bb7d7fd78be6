//! Customer session middleware.

use std::sync::Arc;

use salessense_app::domain::sessions::SessionsServiceError;
use salvo::prelude::*;
use tracing::error;

use crate::{auth::extract_bearer_token, extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(ErrorKind::Unauthorized.error("Missing or invalid Authorization header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(ErrorKind::internal());
            ctrl.skip_rest();

            return;
        }
    };

    let session = match state.app.sessions.authenticate(token).await {
        Ok(session) => session,
        Err(SessionsServiceError::NotFound) => {
            res.render(ErrorKind::Unauthorized.error("Invalid or expired session"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to authenticate session: {source}");

            res.render(ErrorKind::internal());
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_session(session);

    ctrl.call_next(req, depot, res).await;
}
