use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use log::debug;
use token_engine::AuthError;

const BEARER_SCHEME: &str = "bearer";
const BASIC_SCHEME: &str = "basic";

/// Splits an `Authorization` header into its scheme and credentials, matching
/// the scheme case-insensitively.
fn authorization<'a>(headers: &'a HeaderMap, scheme: &str) -> Option<&'a str> {
    let value = headers.get(AUTHORIZATION)?;
    let value = match value.to_str() {
        Ok(value) => value,
        Err(e) => {
            debug!("Authorization header is not valid UTF-8: {}", e);
            return None;
        }
    };
    let (found, credentials) = value.trim().split_once(' ')?;
    found
        .eq_ignore_ascii_case(scheme)
        .then(|| credentials.trim())
}

/// Extracts the bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    match authorization(headers, BEARER_SCHEME) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MissingCredential),
    }
}

/// Client credentials sent with HTTP Basic authentication (RFC 6749 §2.3.1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Decodes `Authorization: Basic base64(client_id:client_secret)`.
///
/// Returns `None` when the header is absent, uses another scheme or cannot be
/// decoded; the caller then falls back to the form fields.
pub fn basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let encoded = authorization(headers, BASIC_SCHEME)?;
    let decoded = match STANDARD.decode(encoded) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!("Failed to decode Basic credentials: {}", e);
            return None;
        }
    };
    let decoded = String::from_utf8(decoded).ok()?;
    let (client_id, client_secret) = decoded.split_once(':')?;
    Some(BasicCredentials {
        client_id: client_id.to_string(),
        client_secret: client_secret.to_string(),
    })
}
