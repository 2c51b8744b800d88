pub mod handlers;

use crate::state::AppState;
use axum::{routing::get, Router};

/// Query routes; only reachable through the authentication middleware
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/query/health", get(handlers::health_handler))
        .route("/query/persons/{nic}", get(handlers::person_handler))
}
