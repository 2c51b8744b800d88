//! Static client allowlist.

use crate::error::CredentialError;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use subtle::ConstantTimeEq;

/// A registered client and its shared secret
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredential {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredential {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Parses a comma-separated `id:secret` list. Blank entries are skipped.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, CredentialError> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once(':') {
                Some((id, secret)) => Ok(Self::new(id.trim(), secret.trim())),
                None => Err(CredentialError::MalformedEntry(entry.to_string())),
            })
            .collect()
    }
}

impl fmt::Debug for ClientCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredential")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Read-only mapping of client id to secret, built once at startup.
#[derive(Default)]
pub struct CredentialStore {
    clients: HashMap<String, String>,
}

impl CredentialStore {
    /// Builds the store, rejecting empty or duplicated client ids
    pub fn new<I>(credentials: I) -> Result<Self, CredentialError>
    where
        I: IntoIterator<Item = ClientCredential>,
    {
        let mut clients = HashMap::new();
        for credential in credentials {
            if credential.client_id.is_empty() {
                return Err(CredentialError::EmptyClientId);
            }
            if clients.contains_key(&credential.client_id) {
                return Err(CredentialError::DuplicateClient(credential.client_id));
            }
            clients.insert(credential.client_id, credential.client_secret);
        }
        debug!("Loaded {} registered clients", clients.len());
        Ok(Self { clients })
    }

    /// Returns true only for an exact id/secret match.
    ///
    /// Unknown ids and wrong secrets are indistinguishable to the caller.
    pub fn verify_client(&self, client_id: &str, client_secret: &str) -> bool {
        match self.clients.get(client_id) {
            Some(expected) => expected.as_bytes().ct_eq(client_secret.as_bytes()).into(),
            None => false,
        }
    }

    pub fn contains(&self, client_id: &str) -> bool {
        self.clients.contains_key(client_id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("clients", &self.clients.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> CredentialStore {
        CredentialStore::new([
            ClientCredential::new("2oIRGWpHDjmTPqDo8tOJCu2DwANp", "xJclnZNorKGwLJPpKQRAtqK1ZtJh"),
            ClientCredential::new("client_app_2", "secret_key_456"),
            ClientCredential::new("test_client", "test_secret"),
        ])
        .expect("valid credential set")
    }

    fn mutate_each_char(value: &str) -> Vec<String> {
        (0..value.len())
            .map(|i| {
                let mut bytes = value.as_bytes().to_vec();
                bytes[i] = if bytes[i] == b'x' { b'y' } else { b'x' };
                String::from_utf8(bytes).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_verify_exact_pair() {
        let store = test_store();
        assert!(store.verify_client("test_client", "test_secret"));
        assert!(store.verify_client("client_app_2", "secret_key_456"));
        assert!(!store.verify_client("test_client", "secret_key_456"));
        assert!(!store.verify_client("unknown", "test_secret"));
        assert!(!store.verify_client("test_client", ""));
    }

    #[test]
    fn test_single_character_mutations_rejected() {
        let store = test_store();
        for (id, secret) in [
            ("test_client", "test_secret"),
            ("client_app_2", "secret_key_456"),
            ("2oIRGWpHDjmTPqDo8tOJCu2DwANp", "xJclnZNorKGwLJPpKQRAtqK1ZtJh"),
        ] {
            for bad_secret in mutate_each_char(secret) {
                assert!(!store.verify_client(id, &bad_secret), "{id}/{bad_secret}");
            }
            for bad_id in mutate_each_char(id) {
                assert!(!store.verify_client(&bad_id, secret), "{bad_id}/{secret}");
            }
            assert!(!store.verify_client(id, &format!("{secret}x")));
            assert!(!store.verify_client(id, &secret[..secret.len() - 1]));
        }
    }

    #[test]
    fn test_duplicate_client_rejected() {
        let result = CredentialStore::new([
            ClientCredential::new("a", "one"),
            ClientCredential::new("a", "two"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            CredentialError::DuplicateClient("a".to_string())
        );
    }

    #[test]
    fn test_empty_client_id_rejected() {
        let result = CredentialStore::new([ClientCredential::new("", "secret")]);
        assert_eq!(result.unwrap_err(), CredentialError::EmptyClientId);
    }

    #[test]
    fn test_parse_list() {
        let parsed = ClientCredential::parse_list(" a:one , b:two:with-colon,, ").unwrap();
        assert_eq!(
            parsed,
            vec![
                ClientCredential::new("a", "one"),
                ClientCredential::new("b", "two:with-colon"),
            ]
        );
        assert!(ClientCredential::parse_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_list_malformed() {
        assert_eq!(
            ClientCredential::parse_list("a:one,broken").unwrap_err(),
            CredentialError::MalformedEntry("broken".to_string())
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let output = format!("{:?}", ClientCredential::new("a", "hunter2"));
        assert!(!output.contains("hunter2"));
        let output = format!("{:?}", test_store());
        assert!(!output.contains("test_secret"));
    }
}
