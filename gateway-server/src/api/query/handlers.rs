use crate::directory::PersonRecord;
use crate::errors::{ApiError, ErrorBody};
use crate::openapi::QUERY_TAG;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use token_engine::AuthenticatedContext;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QueryHealth {
    pub health_check: String,
    pub client_id: String,
    pub authenticated: bool,
}

/// Reports the identity the request was authenticated as
#[utoipa::path(
    get,
    path = "/query/health",
    tag = QUERY_TAG,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Authenticated health check", body = QueryHealth),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody),
        (status = 403, description = "Client no longer registered", body = ErrorBody)
    )
)]
pub async fn health_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AuthenticatedContext>,
) -> Json<QueryHealth> {
    Json(QueryHealth {
        health_check: state.directory.health(&context),
        client_id: context.client_id().to_string(),
        authenticated: context.is_authenticated(),
    })
}

/// Get person information by NIC
#[utoipa::path(
    get,
    path = "/query/persons/{nic}",
    tag = QUERY_TAG,
    security(("bearer" = [])),
    params(
        ("nic" = String, Path, description = "National identity card number")
    ),
    responses(
        (status = 200, description = "Person record", body = PersonRecord),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorBody),
        (status = 403, description = "Client no longer registered", body = ErrorBody),
        (status = 404, description = "No person with this NIC", body = ErrorBody)
    )
)]
pub async fn person_handler(
    State(state): State<AppState>,
    Extension(context): Extension<AuthenticatedContext>,
    Path(nic): Path<String>,
) -> Result<Json<PersonRecord>, ApiError> {
    state
        .directory
        .find_by_nic(&context, &nic)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("No person found with NIC {}", nic)))
}
