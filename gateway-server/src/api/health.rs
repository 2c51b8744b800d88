use crate::openapi::HEALTH_TAG;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Basic health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Health {
    status: String,
    service: String,
}

/// Service description returned by the root endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    service: String,
    description: String,
    endpoints: BTreeMap<String, String>,
}

/// Basic health check handler
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = Health)
    )
)]
pub(crate) async fn health_check(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
        service: state.settings.service_name.clone(),
    })
}

/// Service information handler
#[utoipa::path(
    get,
    path = "/",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    )
)]
pub(crate) async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    let endpoints = [
        ("health", "/health"),
        ("oauth_token", "/oauth/token"),
        ("oauth_revoke", "/oauth/revoke"),
        ("oauth_introspect", "/oauth/introspect"),
        ("query_health", "/query/health"),
        ("query_person", "/query/persons/{nic}"),
        ("openapi", "/openapi.json"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), path.to_string()))
    .collect();

    Json(ServiceInfo {
        service: state.settings.service_name.clone(),
        description: "Provides person address and profession data by NIC".to_string(),
        endpoints,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
}
