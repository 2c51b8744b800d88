use axum::response::IntoResponse;
use axum::Json;
use http::header::WWW_AUTHENTICATE;
use http::{HeaderValue, StatusCode};
use log::error;
use serde::Serialize;
use token_engine::{AuthError, FailureClass, TokenError};
use utoipa::ToSchema;

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    /// OAuth 2.0 error code (RFC 6749 / RFC 6750)
    pub error: String,
    /// Stable machine-readable failure reason
    pub reason: String,
    /// Human-readable description
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub status_code: StatusCode,
    pub error: &'static str,
    pub reason: &'static str,
    pub detail: String,
}

impl ApiError {
    /// Create a new ApiError with a detail message and status code
    pub fn new<S: ToString>(
        status_code: StatusCode,
        error: &'static str,
        reason: &'static str,
        detail: S,
    ) -> Self {
        Self {
            status_code,
            error,
            reason,
            detail: detail.to_string(),
        }
    }

    /// Create new Internal Server Error (500) with a detail message
    pub fn internal<S: ToString>(detail: S) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "server_error",
            "internal",
            detail,
        )
    }

    /// Create new Not Found Error (404) with a detail message
    pub fn not_found<S: ToString>(detail: S) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", "not_found", detail)
    }
}

fn status_for(class: FailureClass) -> StatusCode {
    match class {
        FailureClass::BadRequest => StatusCode::BAD_REQUEST,
        FailureClass::Unauthorized => StatusCode::UNAUTHORIZED,
        FailureClass::Forbidden => StatusCode::FORBIDDEN,
    }
}

const INVALID_TOKEN: &str = "invalid_token";

fn oauth_code(error: AuthError) -> &'static str {
    match error {
        AuthError::UnsupportedGrant => "unsupported_grant_type",
        AuthError::InvalidCredentials => "invalid_client",
        AuthError::ClientNotFound | AuthError::TokenNotOwned => "access_denied",
        AuthError::MissingCredential
        | AuthError::InvalidSignature
        | AuthError::Revoked
        | AuthError::Expired
        | AuthError::MalformedClaims => INVALID_TOKEN,
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self::new(
            status_for(error.class()),
            oauth_code(error),
            error.reason(),
            error,
        )
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Auth(auth) => auth.into(),
            other => {
                error!("Failed to issue access token: {}", other);
                Self::internal("Failed to issue access token")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code;
        let body = ErrorBody {
            error: self.error.to_string(),
            reason: self.reason.to_string(),
            detail: self.detail,
        };
        let mut response = (status_code, Json(body)).into_response();
        // Bearer challenge only for bearer failures; client authentication uses its own scheme
        if status_code == StatusCode::UNAUTHORIZED && self.error == INVALID_TOKEN {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
