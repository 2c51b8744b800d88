use crate::errors::ApiError;
use crate::headers::bearer_token;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::{debug, warn};
use token_engine::AuthenticatedContext;

/// Resolves the bearer token into an [`AuthenticatedContext`] and attaches it
/// to the request. Requests without a valid token never reach the handler.
pub(super) async fn authentication_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let context = match bearer_token(request.headers())
        .and_then(|token| state.tokens.authenticate(token))
    {
        Ok(context) => context,
        Err(e) => {
            warn!(
                "Rejected request to {}: {}",
                request.uri().path(),
                e.reason()
            );
            return ApiError::from(e).into_response();
        }
    };

    debug!("Authenticated request from client '{}'", context.client_id());
    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Rejects callers whose client id has been removed from the allowlist since
/// their token was issued. Must run after [`authentication_middleware`].
pub(super) async fn registered_client_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(context) = request.extensions().get::<AuthenticatedContext>() else {
        warn!("Registered client check ran without an authenticated context");
        return ApiError::internal("Authentication context is missing").into_response();
    };

    if let Err(e) = state.tokens.require_valid_client(context) {
        return ApiError::from(e).into_response();
    }
    next.run(request).await
}
