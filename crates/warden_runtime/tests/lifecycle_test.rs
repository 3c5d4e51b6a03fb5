//! Run/stop state machine.

mod test_utils;

use std::sync::Arc;
use test_utils::{config, next_entries, posts_by, runtime, wait_for, wait_stopped};
use warden_core::Credentials;
use warden_error::PlatformErrorKind;
use warden_runtime::{InMemoryPlatform, RuntimeEvent, RuntimePhase, StopReason};

#[tokio::test(start_paused = true)]
async fn test_run_authenticates_when_needed() {
    let platform = Arc::new(InMemoryPlatform::new());
    let runtime = runtime(platform.clone(), config("rust", &[], ""));

    assert!(runtime.run().await);
    assert_eq!(platform.auth_calls(), 1);
    assert!(runtime.status().running);
    assert!(runtime.status().authenticated);

    runtime.stop();
    runtime.join().await;
    assert_eq!(runtime.phase(), RuntimePhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_run_stays_idle_when_authentication_fails() {
    let platform = Arc::new(InMemoryPlatform::new());
    platform.fail_authentication(PlatformErrorKind::Unauthorized("nope".to_string()));
    let runtime = runtime(platform.clone(), config("rust", &[], ""));

    assert!(!runtime.run().await);
    assert_eq!(runtime.phase(), RuntimePhase::Idle);
    assert_eq!(platform.fetch_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_run_with_incomplete_credentials_is_rejected() {
    let platform = Arc::new(InMemoryPlatform::new());
    let runtime = runtime(platform.clone(), config("rust", &[], ""));
    runtime.configure(Credentials::new("bot", "", "", "", ""));

    assert!(!runtime.run().await);
    assert_eq!(platform.auth_calls(), 0);
    assert!(!runtime.status().running);
}

#[tokio::test(start_paused = true)]
async fn test_second_run_is_rejected_without_duplicate_work() {
    let platform = Arc::new(
        InMemoryPlatform::new().with_posts("rust", posts_by("bob", &["1", "2", "3"])),
    );
    let runtime = runtime(platform.clone(), config("rust", &[], ""));
    let mut rx = runtime.subscribe();

    assert!(runtime.run().await);
    assert!(!runtime.run().await);

    let entries = next_entries(&mut rx, 3).await;
    assert_eq!(entries.len(), 3);

    runtime.stop();
    runtime.join().await;

    assert_eq!(platform.fetch_count(), 1);
    assert_eq!(runtime.status().journal_count, 3);
    assert_eq!(platform.upvoted().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_run_rejected_while_stopping() {
    let platform = Arc::new(InMemoryPlatform::new());
    let runtime = runtime(platform.clone(), config("rust", &[], ""));

    assert!(runtime.run().await);
    runtime.stop();
    assert_eq!(runtime.phase(), RuntimePhase::Stopping);
    assert!(!runtime.run().await);

    runtime.join().await;
    assert_eq!(runtime.phase(), RuntimePhase::Idle);
    assert!(runtime.run().await, "runtime can be restarted once idle");
    runtime.stop();
    runtime.join().await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_is_idempotent() {
    let platform = Arc::new(InMemoryPlatform::new());
    let runtime = runtime(platform.clone(), config("rust", &[], ""));

    runtime.stop();
    runtime.stop();
    assert!(!runtime.status().running);

    assert!(runtime.run().await);
    let mut rx = runtime.subscribe();
    runtime.stop();
    runtime.stop();
    assert_eq!(wait_stopped(&mut rx).await, StopReason::Requested);
    runtime.join().await;

    runtime.stop();
    assert!(!runtime.status().running);
    assert_eq!(runtime.phase(), RuntimePhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_stop_mid_batch_finishes_current_post_only() {
    let platform = Arc::new(
        InMemoryPlatform::new()
            .with_posts("rust", posts_by("bob", &["1", "2", "3", "4"]))
            .with_reaction_delay(std::time::Duration::from_secs(1)),
    );
    let runtime = runtime(platform.clone(), config("rust", &[], ""));
    let mut rx = runtime.subscribe();

    assert!(runtime.run().await);
    let first = next_entries(&mut rx, 1).await;
    assert_eq!(first[0].post_id().0, "1");

    // Post 2 is mid-upvote now; it must complete, post 3 must not start.
    runtime.stop();
    runtime.join().await;

    let journal = runtime.journal();
    let ids: Vec<_> = journal.iter().map(|e| e.post_id().0.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(platform.upvoted().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_started_event_carries_target() {
    let platform = Arc::new(InMemoryPlatform::new());
    let runtime = runtime(platform.clone(), config("rust", &["alice", "carol"], ""));
    let mut rx = runtime.subscribe();

    assert!(runtime.run().await);
    let started = wait_for(&mut rx, |e| matches!(e, RuntimeEvent::Started { .. })).await;
    assert_eq!(
        started,
        RuntimeEvent::Started {
            identity: "warden-bot".to_string(),
            community: Some("rust".to_string()),
        }
    );

    let status = runtime.status();
    assert_eq!(status.current_community.as_deref(), Some("rust"));
    assert_eq!(status.protected_count, 2);

    runtime.stop();
    runtime.join().await;
}

#[tokio::test(start_paused = true)]
async fn test_losing_session_stops_worker() {
    let platform = Arc::new(InMemoryPlatform::new());
    let runtime = runtime(platform.clone(), config("rust", &[], ""));
    let mut rx = runtime.subscribe();

    assert!(runtime.run().await);
    platform.fail_authentication(PlatformErrorKind::Unauthorized("revoked".to_string()));
    assert!(!runtime.authenticate().await);

    let status = runtime.status();
    assert!(!status.running);
    assert!(!status.authenticated);

    assert_eq!(wait_stopped(&mut rx).await, StopReason::SessionLost);
    runtime.join().await;
    assert_eq!(runtime.phase(), RuntimePhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_status_never_reports_running_without_session() {
    let platform = Arc::new(
        InMemoryPlatform::new().with_posts("rust", posts_by("bob", &["1", "2"])),
    );
    let runtime = runtime(platform.clone(), config("rust", &[], "hi"));

    let observer = {
        let runtime = runtime.clone();
        tokio::spawn(async move {
            let mut checks = 0usize;
            for _ in 0..200 {
                let status = runtime.status();
                assert!(!(status.running && !status.authenticated));
                checks += 1;
                tokio::task::yield_now().await;
            }
            checks
        })
    };

    assert!(runtime.run().await);
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
    platform.fail_authentication(PlatformErrorKind::Unauthorized("revoked".to_string()));
    runtime.authenticate().await;

    assert_eq!(observer.await.unwrap(), 200);
    runtime.stop();
    runtime.join().await;
}
