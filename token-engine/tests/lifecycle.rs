use chrono::TimeDelta;
use std::sync::Arc;
use token_engine::{
    AuthError, ClientCredential, CredentialStore, SigningKeys, TokenError, TokenGrant,
    TokenRegistry, TokenService, default_ttl,
};

const CLIENTS: &[(&str, &str)] = &[
    ("2oIRGWpHDjmTPqDo8tOJCu2DwANp", "xJclnZNorKGwLJPpKQRAtqK1ZtJh"),
    ("client_app_2", "secret_key_456"),
    ("test_client", "test_secret"),
];

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn service_with_keys(keys: SigningKeys) -> TokenService {
    let store = CredentialStore::new(
        CLIENTS
            .iter()
            .map(|(id, secret)| ClientCredential::new(*id, *secret)),
    )
    .expect("valid credential set");
    TokenService::new(store, keys, TokenRegistry::default(), default_ttl())
}

fn grant<'a>(client_id: &'a str, client_secret: &'a str) -> TokenGrant<'a> {
    TokenGrant {
        grant_type: "client_credentials",
        client_id,
        client_secret,
    }
}

#[test]
fn issued_tokens_resolve_to_their_client() {
    init_logger();
    let service = service_with_keys(SigningKeys::generate());

    for (id, secret) in CLIENTS {
        let token = service.exchange(grant(id, secret)).unwrap();
        let context = service.authenticate(token.as_str()).unwrap();
        assert_eq!(context.client_id(), *id);
        assert!(context.is_authenticated());
    }
}

#[test]
fn revoked_token_is_rejected_until_expiry_and_beyond() {
    init_logger();
    let service = service_with_keys(SigningKeys::generate());
    let token = service.exchange(grant("test_client", "test_secret")).unwrap();

    service.revoke(token.as_str());
    for _ in 0..5 {
        assert_eq!(
            service.authenticate(token.as_str()),
            Err(AuthError::Revoked)
        );
    }
}

#[test]
fn expired_token_in_registry_reports_expired() {
    init_logger();
    let service = service_with_keys(SigningKeys::generate());
    let token = service
        .issuer()
        .issue("test_client", Some(TimeDelta::seconds(-1)))
        .unwrap();

    assert!(service.registry().contains(token.as_str()));
    assert_eq!(
        service.authenticate(token.as_str()),
        Err(AuthError::Expired)
    );
}

#[test]
fn tokens_from_another_process_fail_signature_check() {
    init_logger();
    let ours = service_with_keys(SigningKeys::generate());
    let theirs = service_with_keys(SigningKeys::generate());

    let token = theirs.exchange(grant("test_client", "test_secret")).unwrap();
    assert_eq!(
        ours.authenticate(token.as_str()),
        Err(AuthError::InvalidSignature)
    );
}

#[test]
fn configured_secret_survives_restart() {
    init_logger();
    let before = service_with_keys(SigningKeys::from_secret(b"shared-deployment-secret"));
    let token = before.exchange(grant("test_client", "test_secret")).unwrap();

    // Same secret, fresh registry: the signature verifies but the token was
    // never registered in this process.
    let after = service_with_keys(SigningKeys::from_secret(b"shared-deployment-secret"));
    assert_eq!(
        after.authenticate(token.as_str()),
        Err(AuthError::Revoked)
    );
}

#[test]
fn burst_of_issuance_leaves_other_clients_tokens_valid() {
    init_logger();
    let service = service_with_keys(SigningKeys::generate());
    let token = service.exchange(grant("test_client", "test_secret")).unwrap();

    for _ in 0..2_000 {
        service
            .exchange(grant("client_app_2", "secret_key_456"))
            .unwrap();
    }

    let context = service.authenticate(token.as_str()).unwrap();
    assert_eq!(context.client_id(), "test_client");
    assert_eq!(service.registry().tracked_count(), 2_001);
}

#[test]
fn unsupported_grant_issues_nothing() {
    init_logger();
    let service = service_with_keys(SigningKeys::generate());
    let result = service.exchange(TokenGrant {
        grant_type: "password",
        client_id: "test_client",
        client_secret: "test_secret",
    });

    assert!(matches!(
        result,
        Err(TokenError::Auth(AuthError::UnsupportedGrant))
    ));
    assert_eq!(service.registry().tracked_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_issue_verify_and_revoke() {
    init_logger();
    let service = Arc::new(service_with_keys(SigningKeys::generate()));

    let handles: Vec<_> = (0..32)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                let (id, secret) = CLIENTS[i % CLIENTS.len()];
                let token = service.exchange(grant(id, secret)).unwrap();
                assert_eq!(
                    service.authenticate(token.as_str()).unwrap().client_id(),
                    id
                );
                if i % 2 == 0 {
                    service.revoke(token.as_str());
                    assert_eq!(
                        service.authenticate(token.as_str()),
                        Err(AuthError::Revoked)
                    );
                }
                (i, token)
            })
        })
        .collect();

    for handle in handles {
        let (i, token) = handle.await.unwrap();
        assert_eq!(service.authenticate(token.as_str()).is_ok(), i % 2 == 1);
    }
}
