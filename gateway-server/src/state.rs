use crate::config::Settings;
use crate::directory::{DirectoryError, PersonDirectory};
use chrono::TimeDelta;
use log::{info, warn};
use std::sync::Arc;
use thiserror::Error;
use token_engine::{CredentialError, CredentialStore, SigningKeys, TokenRegistry, TokenService};

/// Failures that prevent the gateway from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid client configuration: {0}")]
    Clients(#[from] CredentialError),
    #[error("token TTL of {0} seconds is out of range")]
    TokenTtl(u64),
    #[error("failed to load person records: {0}")]
    Directory(#[from] DirectoryError),
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub tokens: Arc<TokenService>,
    pub directory: Arc<PersonDirectory>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, StartupError> {
        let store = CredentialStore::new(settings.oauth.get_clients()?)?;
        if store.is_empty() {
            warn!(
                "No OAuth clients configured, every token request will be rejected; \
                 set GATEWAY_OAUTH_CLIENTS or see gateway.example.toml"
            );
        } else {
            info!("Loaded {} OAuth client(s)", store.len());
        }

        let keys = match &settings.oauth.signing_secret {
            Some(secret) => {
                info!("Using configured token signing secret");
                SigningKeys::from_secret(secret.as_bytes())
            }
            None => SigningKeys::generate(),
        };

        let ttl = i64::try_from(settings.oauth.token_ttl)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or(StartupError::TokenTtl(settings.oauth.token_ttl))?;

        let registry = TokenRegistry::new(settings.registry.retention());
        let directory = PersonDirectory::load(settings.query.records_file.as_deref())?;

        Ok(Self {
            settings: Arc::new(settings),
            tokens: Arc::new(TokenService::new(store, keys, registry, ttl)),
            directory: Arc::new(directory),
        })
    }

    #[cfg(test)]
    pub fn for_testing(settings: &Settings) -> Self {
        Self::new(settings.clone()).expect("Failed to create test state")
    }
}
