//! Composition root for the credential lifecycle.

use crate::claims::{AccessToken, VerifiedToken};
use crate::context::AuthenticatedContext;
use crate::credentials::CredentialStore;
use crate::error::{AuthError, TokenError};
use crate::issuer::TokenIssuer;
use crate::keys::SigningKeys;
use crate::registry::TokenRegistry;
use crate::verifier::TokenVerifier;
use chrono::TimeDelta;
use log::{info, warn};

/// The only grant type accepted by the token exchange
pub const CLIENT_CREDENTIALS_GRANT: &str = "client_credentials";

/// Client-credentials exchange input
#[derive(Debug, Clone, Copy)]
pub struct TokenGrant<'a> {
    pub grant_type: &'a str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// Owns the credential store, registry, issuer and verifier for the lifetime
/// of the process
#[derive(Debug)]
pub struct TokenService {
    store: CredentialStore,
    registry: TokenRegistry,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl TokenService {
    pub fn new(
        store: CredentialStore,
        keys: SigningKeys,
        registry: TokenRegistry,
        default_ttl: TimeDelta,
    ) -> Self {
        Self {
            issuer: TokenIssuer::new(keys.clone(), registry.clone(), default_ttl),
            verifier: TokenVerifier::new(keys, registry.clone()),
            store,
            registry,
        }
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Exchanges client credentials for an access token with the default
    /// lifetime. The grant type is checked before the credentials.
    pub fn exchange(&self, grant: TokenGrant<'_>) -> Result<AccessToken, TokenError> {
        if grant.grant_type != CLIENT_CREDENTIALS_GRANT {
            warn!(
                "Unsupported grant type '{}' from client '{}'",
                grant.grant_type, grant.client_id
            );
            return Err(AuthError::UnsupportedGrant.into());
        }

        self.authenticate_client(grant.client_id, grant.client_secret)?;

        let token = self.issuer.issue(grant.client_id, None)?;
        info!("Issued access token to client '{}'", grant.client_id);
        Ok(token)
    }

    /// Resolves a bearer token into the caller's identity
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedContext, AuthError> {
        self.verifier.verify(token).map(AuthenticatedContext::from)
    }

    /// Verifies a token and returns its details, for introspection
    pub fn introspect(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        self.verifier.verify(token)
    }

    /// Stricter check that the authenticated client is still registered
    pub fn require_valid_client(&self, context: &AuthenticatedContext) -> Result<(), AuthError> {
        if self.store.contains(context.client_id()) {
            Ok(())
        } else {
            warn!(
                "Client '{}' holds a valid token but is no longer registered",
                context.client_id()
            );
            Err(AuthError::ClientNotFound)
        }
    }

    /// Removes a token from the registry. Idempotent.
    pub fn revoke(&self, token: &str) {
        self.registry.remove(token);
    }

    /// Revokes a token on behalf of the client it was issued to.
    ///
    /// Tokens that do not carry a valid signature are ignored, matching
    /// RFC 7009 where an unknown token is not an error.
    pub fn revoke_for_client(
        &self,
        client_id: &str,
        client_secret: &str,
        token: &str,
    ) -> Result<(), AuthError> {
        self.authenticate_client(client_id, client_secret)?;

        match self.verifier.peek_subject(token) {
            Ok(owner) if owner != client_id => {
                warn!(
                    "Client '{}' attempted to revoke a token issued to '{}'",
                    client_id, owner
                );
                Err(AuthError::TokenNotOwned)
            }
            Ok(_) => {
                self.revoke(token);
                info!("Client '{}' revoked an access token", client_id);
                Ok(())
            }
            Err(_) => Ok(()),
        }
    }

    fn authenticate_client(&self, client_id: &str, client_secret: &str) -> Result<(), AuthError> {
        if self.store.verify_client(client_id, client_secret) {
            Ok(())
        } else {
            warn!("Invalid client credentials for client_id: {}", client_id);
            Err(AuthError::InvalidCredentials)
        }
    }
}
