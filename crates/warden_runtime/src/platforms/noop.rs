//! No-op platform implementation.

use crate::Platform;
use async_trait::async_trait;
use tracing::debug;
use warden_core::{Credentials, Post, Session};
use warden_error::PlatformResult;

/// Platform that accepts every call and never returns posts.
///
/// Useful for wiring checks: a runtime on this platform authenticates,
/// starts, and idles through empty batches.
#[derive(Debug, Clone, Default)]
pub struct NoOpPlatform;

impl NoOpPlatform {
    /// Create a new no-op platform.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Platform for NoOpPlatform {
    async fn authenticate(&self, credentials: &Credentials) -> PlatformResult<Session> {
        debug!(identity = %credentials.identity(), "NoOpPlatform: authenticate() called");
        Ok(Session::new(credentials.identity().clone(), "noop"))
    }

    async fn fetch_recent(
        &self,
        _session: &Session,
        community: &str,
        limit: usize,
    ) -> PlatformResult<Vec<Post>> {
        debug!(community, limit, "NoOpPlatform: fetch_recent() called (no posts)");
        Ok(Vec::new())
    }

    async fn upvote(&self, _session: &Session, post: &Post) -> PlatformResult<()> {
        debug!(post_id = %post.id, "NoOpPlatform: upvote() called (no action taken)");
        Ok(())
    }

    async fn reply(&self, _session: &Session, post: &Post, text: &str) -> PlatformResult<()> {
        debug!(
            post_id = %post.id,
            text_len = text.len(),
            "NoOpPlatform: reply() called (no action taken)"
        );
        Ok(())
    }

    fn platform_name(&self) -> &str {
        "noop"
    }
}
