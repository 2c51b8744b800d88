//! OAuth 2.0 Authorization Server endpoints
//!
//! ## Supported OAuth 2.0 Flows
//! - Client Credentials Grant (RFC 6749 Section 4.4)
//! - Token Revocation (RFC 7009)
//! - Token Introspection (RFC 7662)
//!
//! Clients are read from configuration at startup. Tokens are tracked by the
//! in-process registry and do not survive a restart.

pub mod handlers;
pub mod models;

use crate::state::AppState;
use axum::{routing::post, Router};

/// Creates OAuth 2.0 routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/oauth/token", post(handlers::token))
        .route("/oauth/revoke", post(handlers::revoke))
        .route("/oauth/introspect", post(handlers::introspect))
}
