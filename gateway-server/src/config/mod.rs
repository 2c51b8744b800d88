use crate::config::oauth::OAuthConfig;
use crate::config::query::QueryConfig;
use crate::config::registry::RegistryConfig;
use confique::Config;

pub mod oauth;
pub mod query;
pub mod registry;

/// Environment variable naming an optional TOML configuration file
pub const CONFIG_FILE_ENV: &str = "GATEWAY_CONFIG_FILE";

/// Main configuration structure for the gateway
#[derive(Debug, Config, Clone)]
pub struct Settings {
    /// The port the gateway will listen to (default: 8080)
    #[config(env = "GATEWAY_PORT", default = 8080)]
    pub port: u16,

    /// Service name reported by the health endpoints (default: mock-rgd)
    #[config(env = "GATEWAY_SERVICE_NAME", default = "mock-rgd")]
    pub service_name: String,

    /// OAuth 2.0 client and token configuration
    #[config(nested)]
    pub oauth: OAuthConfig,

    /// Issued-token registry configuration
    #[config(nested)]
    pub registry: RegistryConfig,

    /// Person directory configuration
    #[config(nested)]
    pub query: QueryConfig,
}

impl Settings {
    /// Loads settings from the environment, layered over the TOML file named
    /// by `GATEWAY_CONFIG_FILE` when it is set.
    pub fn new() -> Result<Self, confique::Error> {
        let mut builder = Self::builder().env();
        if let Ok(path) = std::env::var(CONFIG_FILE_ENV) {
            builder = builder.file(path);
        }
        builder.load()
    }

    #[cfg(test)]
    pub fn for_test() -> Self {
        Self {
            port: 0, // Let the OS choose a port
            service_name: "mock-rgd".to_string(),
            oauth: OAuthConfig {
                clients: "2oIRGWpHDjmTPqDo8tOJCu2DwANp:xJclnZNorKGwLJPpKQRAtqK1ZtJh,\
                          client_app_2:secret_key_456,\
                          test_client:test_secret"
                    .to_string(),
                token_ttl: 3600,
                signing_secret: None,
                require_registered_client: false,
            },
            registry: RegistryConfig { retention: 3600 },
            query: QueryConfig { records_file: None },
        }
    }
}
