//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use salessense_app::domain::customers::CustomersServiceError;

use crate::{
    customers::errors as customer_errors, extensions::*, sessions::errors::into_status_error,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    /// Registered email address or mobile number
    pub identifier: String,
}

/// Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub session_uuid: Uuid,
    pub customer_uuid: Uuid,

    /// Bearer token for subsequent requests. Shown once.
    pub token: String,
}

/// Login Handler
///
/// Opens a new session, with an empty cart, for the customer registered
/// under the given email or mobile number.
#[endpoint(
    tags("sessions"),
    summary = "Log In",
    responses(
        (status_code = StatusCode::CREATED, description = "Session opened"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown email or mobile number"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identifier = json.into_inner().identifier;
    let identifier = identifier.trim();

    if identifier.is_empty() {
        return Err(ErrorKind::BadInput.error("Email or mobile number is required"));
    }

    let customer = match state.app.customers.find_by_identifier(identifier).await {
        Ok(customer) => customer,
        Err(CustomersServiceError::NotFound) => {
            return Err(ErrorKind::Unauthorized.error("Unknown email or mobile number"));
        }
        Err(error) => return Err(customer_errors::into_status_error(error)),
    };

    let issued = state
        .app
        .sessions
        .create_session(customer.uuid)
        .await
        .map_err(into_status_error)?;

    info!(customer_uuid = %customer.uuid, session_uuid = %issued.session.uuid, "session opened");

    res.status_code(StatusCode::CREATED);

    Ok(Json(SessionResponse {
        session_uuid: issued.session.uuid.into(),
        customer_uuid: customer.uuid.into(),
        token: issued.token,
    }))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use salessense_app::domain::{
        customers::{
            MockCustomersService,
            records::{CustomerRecord, CustomerUuid},
        },
        sessions::{
            MockSessionsService,
            records::{IssuedSession, SessionRecord, SessionUuid},
        },
    };

    use crate::test_helpers::{AppMocks, public_service};

    use super::*;

    fn make_service(customers: MockCustomersService, sessions: MockSessionsService) -> Service {
        public_service(
            AppMocks {
                customers,
                sessions,
                ..AppMocks::default()
            },
            Router::with_path("sessions").post(handler),
        )
    }

    fn customer(uuid: CustomerUuid) -> CustomerRecord {
        CustomerRecord {
            uuid,
            name: "Kavya".to_string(),
            email: "kavya@example.com".to_string(),
            mobile: "9876543210".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_login_by_mobile_opens_session() -> TestResult {
        let uuid = CustomerUuid::new();
        let session_uuid = SessionUuid::new();

        let mut customers = MockCustomersService::new();

        customers
            .expect_find_by_identifier()
            .once()
            .withf(|identifier| identifier == "9876543210")
            .return_once(move |_| Ok(customer(uuid)));

        let mut sessions = MockSessionsService::new();

        sessions
            .expect_create_session()
            .once()
            .withf(move |c| *c == uuid)
            .return_once(move |customer_uuid| {
                Ok(IssuedSession {
                    token: "ss_v1_token".to_string(),
                    session: SessionRecord {
                        uuid: session_uuid,
                        customer_uuid,
                        created_at: Timestamp::UNIX_EPOCH,
                    },
                })
            });

        let mut res = TestClient::post("http://example.com/sessions")
            .json(&json!({ "identifier": " 9876543210 " }))
            .send(&make_service(customers, sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(body.token, "ss_v1_token");
        assert_eq!(body.session_uuid, session_uuid.into_uuid());
        assert_eq!(body.customer_uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_identifier_returns_401() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_find_by_identifier()
            .once()
            .return_once(|_| Err(CustomersServiceError::NotFound));

        let mut sessions = MockSessionsService::new();

        sessions.expect_create_session().never();

        let res = TestClient::post("http://example.com/sessions")
            .json(&json!({ "identifier": "nobody@example.com" }))
            .send(&make_service(customers, sessions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_blank_identifier_returns_400() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers.expect_find_by_identifier().never();

        let res = TestClient::post("http://example.com/sessions")
            .json(&json!({ "identifier": "   " }))
            .send(&make_service(customers, MockSessionsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
