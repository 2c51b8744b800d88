use crate::claims::{ACCESS_TOKEN_TYPE, Claims, VerifiedToken};
use crate::error::AuthError;
use crate::keys::{ALGORITHM, SigningKeys};
use crate::registry::TokenRegistry;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Validation, decode};
use log::{debug, warn};

/// Checks bearer tokens against the signing secret, the registry and the clock
#[derive(Clone, Debug)]
pub struct TokenVerifier {
    keys: SigningKeys,
    registry: TokenRegistry,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(keys: SigningKeys, registry: TokenRegistry) -> Self {
        // Expiry and required claims are checked here, after the registry
        // lookup, so each failure keeps its own reason.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            keys,
            registry,
            validation,
        }
    }

    /// Verifies a token, short-circuiting on the first failed check:
    /// signature, then registry membership, then expiry, then subject.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        let claims = self.decode(token)?;

        if !self.registry.contains(token) {
            warn!("Rejected token that is not in the registry");
            return Err(AuthError::Revoked);
        }

        let exp = claims.exp.ok_or_else(|| {
            warn!("Rejected token without an expiry claim");
            AuthError::MalformedClaims
        })?;
        if Utc::now().timestamp() >= exp {
            debug!("Rejected expired token (exp={})", exp);
            return Err(AuthError::Expired);
        }
        let expires_at = DateTime::from_timestamp(exp, 0).ok_or(AuthError::MalformedClaims)?;

        let client_id = subject(&claims)?;
        if claims.token_type.as_deref() != Some(ACCESS_TOKEN_TYPE) {
            warn!("Rejected token of unexpected type {:?}", claims.token_type);
            return Err(AuthError::MalformedClaims);
        }

        let issued_at = claims.iat.and_then(|iat| DateTime::from_timestamp(iat, 0));
        Ok(VerifiedToken::new(client_id, issued_at, expires_at))
    }

    /// Returns the subject of a correctly signed token without consulting
    /// the registry or the clock
    pub fn peek_subject(&self, token: &str) -> Result<String, AuthError> {
        let claims = self.decode(token)?;
        subject(&claims)
    }

    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, self.keys.decoding(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!("Token signature verification failed: {}", e);
                AuthError::InvalidSignature
            })
    }
}

fn subject(claims: &Claims) -> Result<String, AuthError> {
    match claims.sub.as_deref() {
        Some(sub) if !sub.is_empty() => Ok(sub.to_string()),
        _ => {
            warn!("Rejected token without a subject claim");
            Err(AuthError::MalformedClaims)
        }
    }
}
