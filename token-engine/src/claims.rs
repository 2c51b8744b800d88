use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Value of the `type` claim carried by every access token
pub const ACCESS_TOKEN_TYPE: &str = "access_token";

/// Token type label returned by the token endpoint
pub const BEARER: &str = "bearer";

/// Claims embedded in an access token.
///
/// Every field is optional on the way in so a signed but incomplete token
/// surfaces as malformed claims rather than a decoding failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the client id the token is bound to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Issued at (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiration time (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Unique token id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    pub(crate) fn access(client_id: &str, jti: String, issued_at: i64, expires_at: i64) -> Self {
        Self {
            sub: Some(client_id.to_string()),
            iat: Some(issued_at),
            exp: Some(expires_at),
            token_type: Some(ACCESS_TOKEN_TYPE.to_string()),
            jti: Some(jti),
        }
    }
}

/// A freshly minted, registered access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    client_id: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub(crate) fn new(
        token: String,
        client_id: String,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            client_id,
            issued_at,
            expires_at,
        }
    }

    /// Serialized, signed form presented as the bearer credential
    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub fn into_string(self) -> String {
        self.token
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Lifetime in seconds, as reported to the client
    pub fn expires_in(&self) -> i64 {
        (self.expires_at - self.issued_at).num_seconds()
    }
}

/// Outcome of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    client_id: String,
    issued_at: Option<DateTime<Utc>>,
    expires_at: DateTime<Utc>,
}

impl VerifiedToken {
    pub(crate) fn new(
        client_id: String,
        issued_at: Option<DateTime<Utc>>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            client_id,
            issued_at,
            expires_at,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub(crate) fn into_client_id(self) -> String {
        self.client_id
    }
}
