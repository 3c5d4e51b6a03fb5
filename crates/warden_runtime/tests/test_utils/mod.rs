//! Shared helpers for runtime integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use warden_core::{
    Credentials, JournalEntry, Post, ReactionPolicyBuilder, RuntimeConfig, RuntimeConfigBuilder,
};
use warden_runtime::{InMemoryPlatform, Runtime, RuntimeEvent, StopReason};

pub fn credentials() -> Credentials {
    Credentials::new("warden-bot", "hunter2", "app-key", "app-secret", "warden-tests/1.0")
}

pub fn config(community: &str, protected: &[&str], reply_text: &str) -> RuntimeConfig {
    RuntimeConfigBuilder::default()
        .target_community(community)
        .protected(
            protected
                .iter()
                .map(|p| p.to_string())
                .collect::<std::collections::BTreeSet<_>>(),
        )
        .reactions(
            ReactionPolicyBuilder::default()
                .upvote(true)
                .reply(true)
                .reply_text(reply_text)
                .build()
                .expect("valid policy"),
        )
        .build()
        .expect("valid config")
}

pub fn posts_by(author: &str, ids: &[&str]) -> Vec<Post> {
    ids.iter().map(|id| Post::new(*id, Some(author))).collect()
}

pub fn runtime(platform: Arc<InMemoryPlatform>, config: RuntimeConfig) -> Runtime {
    Runtime::builder()
        .platform(platform)
        .credentials(credentials())
        .config(config)
        .build()
        .expect("valid runtime")
}

/// Collect the next `n` journal entries from the event stream.
pub async fn next_entries(
    rx: &mut broadcast::Receiver<RuntimeEvent>,
    n: usize,
) -> Vec<JournalEntry> {
    let mut entries = Vec::with_capacity(n);
    while entries.len() < n {
        match rx.recv().await {
            Ok(RuntimeEvent::PostProcessed { entry }) => entries.push(entry),
            Ok(_) => {}
            Err(RecvError::Lagged(_)) => {}
            Err(RecvError::Closed) => panic!("event channel closed"),
        }
    }
    entries
}

/// Wait for the first event matching `pred`, returning it.
pub async fn wait_for(
    rx: &mut broadcast::Receiver<RuntimeEvent>,
    pred: impl Fn(&RuntimeEvent) -> bool,
) -> RuntimeEvent {
    loop {
        match rx.recv().await {
            Ok(event) if pred(&event) => return event,
            Ok(_) | Err(RecvError::Lagged(_)) => {}
            Err(RecvError::Closed) => panic!("event channel closed"),
        }
    }
}

pub async fn wait_stopped(rx: &mut broadcast::Receiver<RuntimeEvent>) -> StopReason {
    match wait_for(rx, |e| matches!(e, RuntimeEvent::Stopped { .. })).await {
        RuntimeEvent::Stopped { reason } => reason,
        _ => unreachable!(),
    }
}
