use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use rand::RngCore;
use rand::rngs::OsRng;
use std::fmt;

/// Signing algorithm for every access token
pub const ALGORITHM: Algorithm = Algorithm::HS256;

const GENERATED_SECRET_LEN: usize = 32;

/// Process-wide symmetric secret used to sign and verify access tokens.
///
/// A generated secret lives only as long as the process; restarting
/// invalidates every token signed with it.
#[derive(Clone)]
pub struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    /// Generates a fresh random secret
    pub fn generate() -> Self {
        let mut secret = [0u8; GENERATED_SECRET_LEN];
        OsRng.fill_bytes(&mut secret);
        Self::from_secret(&secret)
    }

    /// Uses an externally supplied secret
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub(crate) fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub(crate) fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

impl fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeys")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}
