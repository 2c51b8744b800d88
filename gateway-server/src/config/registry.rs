use confique::Config;
use std::time::Duration;

/// Configuration for the issued-token registry
#[derive(Debug, Config, Clone)]
pub struct RegistryConfig {
    /// Seconds an expired token stays tracked before it is pruned (default: 3600)
    #[config(env = "GATEWAY_REGISTRY_RETENTION", default = 3600)]
    pub retention: u64,
}

impl RegistryConfig {
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention)
    }
}
