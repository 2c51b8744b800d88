//! Set of currently usable tokens.
//!
//! Membership is authoritative: a token missing from the registry is treated
//! as revoked regardless of its signature or expiry. Entries leave the set
//! only when revoked or when pruned after expiry; the set has no capacity
//! bound, so a live token is never evicted to make room for another.

use chrono::Utc;
use log::debug;
use moka::Expiry;
use moka::sync::Cache as MokaCache;
use std::time::{Duration, Instant};

/// Default time an expired token stays tracked before it is pruned
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy)]
struct RegistryEntry {
    expires_at: i64,
}

/// Keeps an entry until `retention` after the token itself expires, so an
/// expired token keeps reporting as expired for a while before it is pruned.
struct RetainPastExpiry {
    retention: Duration,
}

impl Expiry<String, RegistryEntry> for RetainPastExpiry {
    fn expire_after_create(
        &self,
        _token: &String,
        entry: &RegistryEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        let remaining = entry.expires_at.saturating_sub(Utc::now().timestamp());
        let remaining = u64::try_from(remaining).unwrap_or(0);
        Some(Duration::from_secs(remaining).saturating_add(self.retention))
    }
}

/// Thread-safe token set shared by the issuer and the verifier.
///
/// Cloning is cheap and yields a handle to the same set.
#[derive(Clone)]
pub struct TokenRegistry {
    tokens: MokaCache<String, RegistryEntry>,
}

impl TokenRegistry {
    pub fn new(retention: Duration) -> Self {
        let tokens = MokaCache::builder()
            .expire_after(RetainPastExpiry { retention })
            .build();
        Self { tokens }
    }

    /// Tracks a newly issued token until `expires_at` plus the retention window
    pub fn insert(&self, token: &str, expires_at: i64) {
        self.tokens
            .insert(token.to_string(), RegistryEntry { expires_at });
    }

    /// Revokes a token. Removing an absent token is a no-op.
    pub fn remove(&self, token: &str) {
        self.tokens.invalidate(token);
        debug!("Removed token from registry");
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains_key(token)
    }

    /// Number of tracked tokens, including expired ones still inside the
    /// retention window. Runs pending housekeeping first, so keep it off hot
    /// request paths.
    pub fn tracked_count(&self) -> u64 {
        self.tokens.run_pending_tasks();
        self.tokens.entry_count()
    }
}

impl std::fmt::Debug for TokenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRegistry").finish_non_exhaustive()
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION)
    }
}
