//! OAuth 2.0 request/response structures

use serde::{Deserialize, Serialize};
use token_engine::{AccessToken, VerifiedToken, ACCESS_TOKEN_TYPE, BEARER};
use utoipa::ToSchema;

/// OAuth 2.0 Token Request (Client Credentials Grant)
///
/// Missing fields deserialize as empty strings so they fail the grant and
/// credential checks instead of the form extractor.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct TokenRequest {
    /// OAuth 2.0 grant type - must be "client_credentials"
    pub grant_type: String,
    /// Client identifier (may instead be sent with HTTP Basic authentication)
    pub client_id: String,
    /// Client secret (may instead be sent with HTTP Basic authentication)
    pub client_secret: String,
}

/// OAuth 2.0 Token Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// The access token string
    pub access_token: String,
    /// Token type - always "bearer"
    pub token_type: String,
    /// Token expiration in seconds
    pub expires_in: i64,
}

impl From<AccessToken> for TokenResponse {
    fn from(token: AccessToken) -> Self {
        let expires_in = token.expires_in();
        Self {
            access_token: token.into_string(),
            token_type: BEARER.to_string(),
            expires_in,
        }
    }
}

/// OAuth 2.0 Token Revocation Request (RFC 7009)
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RevocationRequest {
    /// The token to revoke
    pub token: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevocationResponse {
    pub revoked: bool,
}

/// OAuth 2.0 Token Introspection Request (RFC 7662)
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct IntrospectionRequest {
    /// The token to introspect
    pub token: String,
}

/// OAuth 2.0 Token Introspection Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IntrospectionResponse {
    /// Whether the token is active
    pub active: bool,
    /// Client identifier that was issued the token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// Token issued at timestamp (Unix time)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Token expiration timestamp (Unix time)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl IntrospectionResponse {
    pub fn inactive() -> Self {
        Self {
            active: false,
            client_id: None,
            iat: None,
            exp: None,
            token_type: None,
        }
    }
}

impl From<VerifiedToken> for IntrospectionResponse {
    fn from(token: VerifiedToken) -> Self {
        Self {
            active: true,
            client_id: Some(token.client_id().to_string()),
            iat: token.issued_at().map(|at| at.timestamp()),
            exp: Some(token.expires_at().timestamp()),
            token_type: Some(ACCESS_TOKEN_TYPE.to_string()),
        }
    }
}
