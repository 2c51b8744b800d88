use crate::claims::VerifiedToken;
use serde::Serialize;

/// Identity of the caller behind a verified bearer token.
///
/// Only obtainable from a successful verification, and read-only afterwards.
/// Lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedContext {
    client_id: String,
    authenticated: bool,
}

impl AuthenticatedContext {
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

impl From<VerifiedToken> for AuthenticatedContext {
    fn from(token: VerifiedToken) -> Self {
        Self {
            client_id: token.into_client_id(),
            authenticated: true,
        }
    }
}
