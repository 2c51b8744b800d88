//! OAuth 2.0 endpoint handlers

use crate::api::oauth::models::{
    IntrospectionRequest, IntrospectionResponse, RevocationRequest, RevocationResponse,
    TokenRequest, TokenResponse,
};
use crate::errors::{ApiError, ErrorBody};
use crate::headers::basic_credentials;
use crate::openapi::OAUTH_TAG;
use crate::state::AppState;
use axum::{
    extract::{Form, State},
    http::HeaderMap,
    Json,
};
use log::{debug, info};
use token_engine::TokenGrant;

/// Client credentials from the form body, or from HTTP Basic authentication
/// when the form carries no client id.
fn client_credentials(headers: &HeaderMap, client_id: String, client_secret: String) -> (String, String) {
    if !client_id.is_empty() {
        return (client_id, client_secret);
    }
    match basic_credentials(headers) {
        Some(basic) => (basic.client_id, basic.client_secret),
        None => (client_id, client_secret),
    }
}

/// OAuth 2.0 Token endpoint (RFC 6749 Section 4.4)
/// Implements the Client Credentials grant
#[utoipa::path(
    post,
    path = "/oauth/token",
    request_body(content = TokenRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 400, description = "Unsupported grant type", body = ErrorBody),
        (status = 401, description = "Invalid client credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = OAUTH_TAG
)]
pub async fn token(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(request): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (client_id, client_secret) =
        client_credentials(&headers, request.client_id, request.client_secret);
    info!(
        "OAuth token request from client_id: {} with grant_type: {}",
        client_id, request.grant_type
    );

    let token = state.tokens.exchange(TokenGrant {
        grant_type: &request.grant_type,
        client_id: &client_id,
        client_secret: &client_secret,
    })?;
    Ok(Json(token.into()))
}

/// OAuth 2.0 Token Revocation endpoint (RFC 7009)
#[utoipa::path(
    post,
    path = "/oauth/revoke",
    request_body(content = RevocationRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token revoked or unknown", body = RevocationResponse),
        (status = 401, description = "Invalid client credentials", body = ErrorBody),
        (status = 403, description = "Token belongs to another client", body = ErrorBody)
    ),
    tag = OAUTH_TAG
)]
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(request): Form<RevocationRequest>,
) -> Result<Json<RevocationResponse>, ApiError> {
    let (client_id, client_secret) =
        client_credentials(&headers, request.client_id, request.client_secret);

    state
        .tokens
        .revoke_for_client(&client_id, &client_secret, &request.token)?;
    Ok(Json(RevocationResponse { revoked: true }))
}

/// OAuth 2.0 Token Introspection endpoint (RFC 7662)
///
/// Inactive tokens are reported without a reason.
#[utoipa::path(
    post,
    path = "/oauth/introspect",
    request_body(content = IntrospectionRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token introspection result", body = IntrospectionResponse)
    ),
    tag = OAUTH_TAG
)]
pub async fn introspect(
    State(state): State<AppState>,
    Form(request): Form<IntrospectionRequest>,
) -> Json<IntrospectionResponse> {
    match state.tokens.introspect(&request.token) {
        Ok(verified) => Json(verified.into()),
        Err(e) => {
            debug!("Token introspection reported inactive: {}", e.reason());
            Json(IntrospectionResponse::inactive())
        }
    }
}
