use crate::api::{health, oauth, query};
use crate::directory::PersonRecord;
use crate::errors::ErrorBody;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const OAUTH_TAG: &str = "OAuth 2.0";
pub(crate) const QUERY_TAG: &str = "Query API";

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::service_info,
        health::health_check,
        oauth::handlers::token,
        oauth::handlers::revoke,
        oauth::handlers::introspect,
        query::handlers::health_handler,
        query::handlers::person_handler,
    ),
    components(schemas(ErrorBody, PersonRecord)),
    modifiers(&BearerSecurity),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = OAUTH_TAG, description = "OAuth 2.0 client credentials endpoints"),
        (name = QUERY_TAG, description = "Bearer-protected person queries"),
    ),
    info(
        title = "Mock RGD Gateway API",
        description = "Person data by NIC behind OAuth 2.0 client credentials",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;

/// Creates a router serving the OpenAPI document as JSON
pub(crate) fn router(api_doc: utoipa::openapi::OpenApi) -> Router<AppState> {
    Router::new().route("/openapi.json", get(move || async move { Json(api_doc) }))
}
