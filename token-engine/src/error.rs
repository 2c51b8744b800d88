use thiserror::Error;

/// Every way a credential exchange or an authenticated request can be refused.
///
/// All kinds are terminal for the request they occur in.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthError {
    #[error("Could not validate credentials")]
    InvalidSignature,

    #[error("Token has been revoked")]
    Revoked,

    #[error("Token has expired")]
    Expired,

    #[error("Token claims are malformed")]
    MalformedClaims,

    #[error("Missing or malformed bearer credential")]
    MissingCredential,

    #[error("Client not found or has been removed")]
    ClientNotFound,

    #[error("Unsupported grant_type. Only 'client_credentials' is supported.")]
    UnsupportedGrant,

    #[error("Invalid client credentials")]
    InvalidCredentials,

    #[error("Token was issued to a different client")]
    TokenNotOwned,
}

/// Coarse response class a failure surfaces as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    BadRequest,
    Unauthorized,
    Forbidden,
}

impl AuthError {
    /// Stable, machine-readable reason string
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::Revoked => "revoked",
            AuthError::Expired => "expired",
            AuthError::MalformedClaims => "malformed_claims",
            AuthError::MissingCredential => "missing_credential",
            AuthError::ClientNotFound => "client_not_found",
            AuthError::UnsupportedGrant => "unsupported_grant",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::TokenNotOwned => "token_not_owned",
        }
    }

    pub fn class(&self) -> FailureClass {
        match self {
            AuthError::UnsupportedGrant => FailureClass::BadRequest,
            AuthError::ClientNotFound | AuthError::TokenNotOwned => FailureClass::Forbidden,
            AuthError::InvalidSignature
            | AuthError::Revoked
            | AuthError::Expired
            | AuthError::MalformedClaims
            | AuthError::MissingCredential
            | AuthError::InvalidCredentials => FailureClass::Unauthorized,
        }
    }
}

/// Errors returned by token issuance and the credential exchange
#[derive(Error, Debug)]
pub enum TokenError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Failed to sign access token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Token lifetime of {0} seconds is out of range")]
    TtlOutOfRange(i64),
}

/// Errors raised while loading the client allowlist
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Duplicate client_id '{0}' in credential set")]
    DuplicateClient(String),

    #[error("Client entry has an empty client_id")]
    EmptyClientId,

    #[error("Malformed client entry '{0}', expected '<client_id>:<client_secret>'")]
    MalformedEntry(String),
}
