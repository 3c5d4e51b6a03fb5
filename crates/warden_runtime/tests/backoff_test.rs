//! Failure classification and wait intervals.

mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use test_utils::{config, next_entries, posts_by, runtime, wait_for};
use warden_error::PlatformErrorKind;
use warden_runtime::{InMemoryPlatform, RuntimeEvent};

async fn gap_after_failed_fetch(kind: PlatformErrorKind) -> (Duration, RuntimeEvent) {
    let platform = Arc::new(InMemoryPlatform::new().with_posts("rust", posts_by("bob", &["1"])));
    platform.fail_next_fetches(kind, 1);
    let runtime = runtime(platform.clone(), config("rust", &[], ""));
    let mut rx = runtime.subscribe();

    assert!(runtime.run().await);
    let failure = wait_for(&mut rx, |e| matches!(e, RuntimeEvent::CycleFailed { .. })).await;
    assert!(runtime.journal().is_empty());
    assert!(runtime.status().running);
    assert!(runtime.last_error().is_some());

    next_entries(&mut rx, 1).await;
    runtime.stop();
    runtime.join().await;

    let times = platform.fetch_times();
    (times[1] - times[0], failure)
}

#[tokio::test(start_paused = true)]
async fn test_unavailable_backs_off_for_outage_interval() {
    let (gap, failure) =
        gap_after_failed_fetch(PlatformErrorKind::Unavailable("503".to_string())).await;

    assert!(gap >= Duration::from_secs(300), "gap was {:?}", gap);
    assert!(matches!(
        failure,
        RuntimeEvent::CycleFailed {
            outage: true,
            backoff_secs: 300,
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_counts_as_outage() {
    let (gap, _) = gap_after_failed_fetch(PlatformErrorKind::RateLimited(30)).await;
    assert!(gap >= Duration::from_secs(300), "gap was {:?}", gap);
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_retries_after_cycle_interval() {
    let (gap, failure) =
        gap_after_failed_fetch(PlatformErrorKind::Transport("connection reset".to_string()))
            .await;

    assert!(gap >= Duration::from_secs(60), "gap was {:?}", gap);
    assert!(gap < Duration::from_secs(300), "gap was {:?}", gap);
    assert!(matches!(
        failure,
        RuntimeEvent::CycleFailed {
            outage: false,
            backoff_secs: 60,
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_stop_interrupts_outage_backoff() {
    let platform = Arc::new(InMemoryPlatform::new());
    platform.fail_next_fetches(PlatformErrorKind::Unavailable("down".to_string()), 1);
    let runtime = runtime(platform.clone(), config("rust", &[], ""));
    let mut rx = runtime.subscribe();

    assert!(runtime.run().await);
    wait_for(&mut rx, |e| matches!(e, RuntimeEvent::CycleFailed { .. })).await;

    let before = tokio::time::Instant::now();
    runtime.stop();
    runtime.join().await;

    assert!(tokio::time::Instant::now() - before < Duration::from_secs(1));
    assert_eq!(platform.fetch_count(), 1);
    assert!(!runtime.status().running);
}
