//! Authentication behaviour of the runtime.

mod test_utils;

use std::sync::Arc;
use test_utils::{config, credentials, runtime};
use warden_core::Credentials;
use warden_error::PlatformErrorKind;
use warden_runtime::{InMemoryPlatform, RuntimeEvent};

#[tokio::test]
async fn test_authenticate_success_stores_session() {
    let platform = Arc::new(InMemoryPlatform::new());
    let runtime = runtime(platform.clone(), config("rust", &[], ""));
    let mut rx = runtime.subscribe();

    assert!(runtime.authenticate().await);
    assert!(runtime.status().authenticated);
    assert!(!runtime.status().running);
    assert_eq!(platform.auth_calls(), 1);
    assert_eq!(
        rx.recv().await.unwrap(),
        RuntimeEvent::Authenticated {
            identity: "warden-bot".to_string()
        }
    );
}

#[tokio::test]
async fn test_incomplete_credentials_never_reach_platform() {
    let complete = credentials();
    let variants = [
        Credentials::new("", "pw", "key", "secret", "sig"),
        Credentials::new("bot", "", "key", "secret", "sig"),
        Credentials::new("bot", "pw", "", "secret", "sig"),
        Credentials::new("bot", "pw", "key", "", "sig"),
        Credentials::new("bot", "pw", "key", "secret", "   "),
        Credentials::default(),
    ];

    for partial in variants {
        let platform = Arc::new(InMemoryPlatform::new());
        let runtime = runtime(platform.clone(), config("rust", &[], ""));
        runtime.configure(partial.clone());

        assert!(!runtime.authenticate().await, "{:?} should fail", partial);
        assert_eq!(platform.auth_calls(), 0);
        assert!(!runtime.status().authenticated);
        assert!(runtime.last_error().unwrap().contains("missing"));
    }

    let platform = Arc::new(InMemoryPlatform::new());
    let runtime = runtime(platform.clone(), config("rust", &[], ""));
    runtime.configure(complete);
    assert!(runtime.authenticate().await);
}

#[tokio::test]
async fn test_failed_exchange_clears_stale_session() {
    let platform = Arc::new(InMemoryPlatform::new());
    let runtime = runtime(platform.clone(), config("rust", &[], ""));
    assert!(runtime.authenticate().await);

    platform.fail_authentication(PlatformErrorKind::Unauthorized("bad password".to_string()));
    assert!(!runtime.authenticate().await);

    let status = runtime.status();
    assert!(!status.authenticated);
    let reason = status.last_error.unwrap();
    assert!(reason.starts_with("Authentication failed"));
    assert!(reason.contains("bad password"));
}

#[tokio::test]
async fn test_authenticate_does_not_start_loop() {
    let platform = Arc::new(InMemoryPlatform::new());
    let runtime = runtime(platform.clone(), config("rust", &[], ""));

    assert!(runtime.authenticate().await);
    tokio::task::yield_now().await;
    assert_eq!(platform.fetch_count(), 0);
    assert!(!runtime.is_running());
}
