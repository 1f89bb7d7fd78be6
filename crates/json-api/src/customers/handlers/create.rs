//! Register Customer Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use salessense_app::domain::customers::{
    data::NewCustomer,
    records::{CustomerRecord, CustomerUuid},
};

use crate::{
    customers::errors::into_status_error, extensions::*, sessions::errors as session_errors,
    state::State,
};

/// Register Customer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisterCustomerRequest {
    pub name: String,
    pub email: String,
    pub mobile: String,
}

impl From<RegisterCustomerRequest> for NewCustomer {
    fn from(request: RegisterCustomerRequest) -> Self {
        NewCustomer {
            uuid: CustomerUuid::new(),
            name: request.name,
            email: request.email,
            mobile: request.mobile,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub created_at: String,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(customer: CustomerRecord) -> Self {
        CustomerResponse {
            uuid: customer.uuid.into(),
            name: customer.name,
            email: customer.email,
            mobile: customer.mobile,
            created_at: customer.created_at.to_string(),
        }
    }
}

/// Registered Customer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RegisteredCustomerResponse {
    pub customer: CustomerResponse,

    /// Bearer token for the session opened on registration. Shown once.
    pub token: String,
}

/// Register Customer Handler
///
/// Creates the account and signs the customer straight in.
#[endpoint(
    tags("customers"),
    summary = "Register Customer",
    responses(
        (status_code = StatusCode::CREATED, description = "Customer registered"),
        (status_code = StatusCode::CONFLICT, description = "Email or mobile already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RegisterCustomerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<RegisteredCustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = state
        .app
        .customers
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let issued = state
        .app
        .sessions
        .create_session(customer.uuid)
        .await
        .map_err(session_errors::into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(RegisteredCustomerResponse {
        customer: customer.into(),
        token: issued.token,
    }))
}
