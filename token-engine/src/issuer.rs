use crate::claims::{AccessToken, Claims};
use crate::error::TokenError;
use crate::keys::{ALGORITHM, SigningKeys};
use crate::registry::TokenRegistry;
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Header, encode};
use log::debug;
use rand::RngCore;
use rand::rngs::OsRng;

/// Default access token lifetime in seconds (60 minutes)
pub const DEFAULT_TTL_SECS: i64 = 3600;

pub fn default_ttl() -> TimeDelta {
    TimeDelta::seconds(DEFAULT_TTL_SECS)
}

/// Mints signed access tokens and registers them
#[derive(Clone, Debug)]
pub struct TokenIssuer {
    keys: SigningKeys,
    registry: TokenRegistry,
    default_ttl: TimeDelta,
}

impl TokenIssuer {
    pub fn new(keys: SigningKeys, registry: TokenRegistry, default_ttl: TimeDelta) -> Self {
        Self {
            keys,
            registry,
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> TimeDelta {
        self.default_ttl
    }

    /// Issues a token bound to `client_id`.
    ///
    /// Callers must have verified the client's credentials first. A negative
    /// `ttl` yields a token that is already expired.
    pub fn issue(&self, client_id: &str, ttl: Option<TimeDelta>) -> Result<AccessToken, TokenError> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let issued_at = Utc::now();
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::TtlOutOfRange(ttl.num_seconds()))?;

        let claims = Claims::access(
            client_id,
            token_id(),
            issued_at.timestamp(),
            expires_at.timestamp(),
        );
        let token = encode(&Header::new(ALGORITHM), &claims, self.keys.encoding())?;

        self.registry.insert(&token, expires_at.timestamp());

        debug!(
            "Issued access token for client '{}', expires at {}",
            client_id,
            expires_at.to_rfc3339()
        );

        Ok(AccessToken::new(
            token,
            client_id.to_string(),
            issued_at,
            expires_at,
        ))
    }
}

/// Random identifier so two tokens minted for the same client in the same
/// second never share a serialized form
fn token_id() -> String {
    format!("{:016x}{:016x}", OsRng.next_u64(), OsRng.next_u64())
}
