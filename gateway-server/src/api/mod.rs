mod authn_middleware;
pub(crate) mod health;
pub(crate) mod oauth;
pub(crate) mod query;

use crate::api::authn_middleware::{authentication_middleware, registered_client_middleware};
use crate::state::AppState;
use axum::{middleware, Router};

/// Combines all API routes into a single router
pub(super) fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(oauth::router())
        .merge(protected_routes(state))
}

/// Creates a router for protected routes that require a bearer token
fn protected_routes(state: &AppState) -> Router<AppState> {
    let mut router = query::router();

    // Layers run in reverse order of addition, so this check runs after authentication
    if state.settings.oauth.require_registered_client {
        router = router.layer(middleware::from_fn_with_state(
            state.clone(),
            registered_client_middleware,
        ));
    }

    router.layer(middleware::from_fn_with_state(
        state.clone(),
        authentication_middleware,
    ))
}
