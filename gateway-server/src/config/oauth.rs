//! OAuth 2.0 configuration

use confique::Config;
use token_engine::{ClientCredential, CredentialError};

/// OAuth 2.0 configuration
#[derive(Debug, Config, Clone)]
pub struct OAuthConfig {
    /// Registered clients as a comma-separated list of `client_id:client_secret`
    /// pairs (default: none, so every exchange fails until this is set;
    /// `gateway.example.toml` shows a working setup)
    #[config(env = "GATEWAY_OAUTH_CLIENTS", default = "")]
    pub clients: String,

    /// Access token TTL in seconds (default: 3600 = 1 hour)
    #[config(env = "GATEWAY_OAUTH_TOKEN_TTL", default = 3600)]
    pub token_ttl: u64,

    /// Secret used to sign access tokens. When unset a random secret is
    /// generated at startup and every token dies with the process.
    #[config(env = "GATEWAY_OAUTH_SIGNING_SECRET")]
    pub signing_secret: Option<String>,

    /// Reject tokens whose client has since been removed from the allowlist
    /// (default: false)
    #[config(env = "GATEWAY_OAUTH_REQUIRE_REGISTERED_CLIENT", default = false)]
    pub require_registered_client: bool,
}

impl OAuthConfig {
    /// Get registered clients as credentials
    pub fn get_clients(&self) -> Result<Vec<ClientCredential>, CredentialError> {
        ClientCredential::parse_list(&self.clients)
    }
}
