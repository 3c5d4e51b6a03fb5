//! Runtime construction.

use std::sync::Arc;
use warden_error::BuilderErrorKind;
use warden_runtime::{LoopPolicyBuilder, NoOpPlatform, Runtime, RuntimePhase};

#[test]
fn test_builder_requires_platform() {
    let err = Runtime::builder().build().unwrap_err();
    assert!(matches!(err.kind(), BuilderErrorKind::MissingField(f) if f == "platform"));
}

#[test]
fn test_builder_rejects_invalid_policy() {
    let policy = LoopPolicyBuilder::default().batch_size(0usize).build().unwrap();
    let err = Runtime::builder()
        .platform(Arc::new(NoOpPlatform::new()))
        .policy(policy)
        .build()
        .unwrap_err();
    assert!(matches!(err.kind(), BuilderErrorKind::InvalidField { .. }));
}

#[test]
fn test_builder_rejects_zero_event_capacity() {
    let result = Runtime::builder()
        .platform(Arc::new(NoOpPlatform::new()))
        .event_capacity(0)
        .build();
    assert!(result.is_err());
}

#[test]
fn test_fresh_runtime_is_idle() {
    let runtime = Runtime::builder()
        .platform(Arc::new(NoOpPlatform::new()))
        .build()
        .unwrap();

    let status = runtime.status();
    assert_eq!(status.phase, RuntimePhase::Idle);
    assert!(!status.running);
    assert!(!status.authenticated);
    assert_eq!(status.journal_count, 0);
    assert!(runtime.last_error().is_none());
}
