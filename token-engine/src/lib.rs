//! # token-engine
//!
//! OAuth2 Client-Credentials token lifecycle: client verification, token
//! issuance, verification and revocation.
//!
//! ## Components
//!
//! - **Credential Store:** static allowlist of client ids and secrets.
//! - **Issuer:** mints HS256-signed, time-bounded tokens and registers them.
//! - **Registry:** set of currently usable tokens; absence means revoked.
//! - **Verifier:** checks signature, registry membership, expiry and subject,
//!   in that order.
//! - **Service:** owns all of the above and exposes the exchange, the
//!   authentication step and revocation.

pub mod claims;
pub mod context;
pub mod credentials;
pub mod error;
pub mod issuer;
pub mod keys;
pub mod registry;
pub mod service;
pub mod verifier;

pub use crate::claims::{ACCESS_TOKEN_TYPE, AccessToken, BEARER, Claims, VerifiedToken};
pub use crate::context::AuthenticatedContext;
pub use crate::credentials::{ClientCredential, CredentialStore};
pub use crate::error::{AuthError, CredentialError, FailureClass, TokenError};
pub use crate::issuer::{DEFAULT_TTL_SECS, TokenIssuer, default_ttl};
pub use crate::keys::SigningKeys;
pub use crate::registry::TokenRegistry;
pub use crate::service::{CLIENT_CREDENTIALS_GRANT, TokenGrant, TokenService};
pub use crate::verifier::TokenVerifier;
