//! Logout Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::info;

use crate::{extensions::*, sessions::errors::into_status_error, state::State};

/// Logout Handler
///
/// Ends the current session. Its cart is discarded with it.
#[endpoint(
    tags("sessions"),
    summary = "Log Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Session ended"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid or expired session"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session = depot.session_or_401()?;

    state
        .app
        .sessions
        .delete_session(session.uuid)
        .await
        .map_err(into_status_error)?;

    info!(session_uuid = %session.uuid, "session closed");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use salessense_app::domain::sessions::{MockSessionsService, SessionsServiceError};

    use crate::test_helpers::{AppMocks, TEST_SESSION_UUID, session_service};

    use super::*;

    fn make_service(sessions: MockSessionsService) -> Service {
        session_service(
            AppMocks {
                sessions,
                ..AppMocks::default()
            },
            Router::with_path("sessions/current").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_logout_deletes_current_session() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions
            .expect_delete_session()
            .once()
            .withf(|session| *session == TEST_SESSION_UUID)
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/sessions/current")
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_of_vanished_session_returns_401() -> TestResult {
        let mut sessions = MockSessionsService::new();

        sessions
            .expect_delete_session()
            .once()
            .return_once(|_| Err(SessionsServiceError::NotFound));

        let res = TestClient::delete("http://example.com/sessions/current")
            .send(&make_service(sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
