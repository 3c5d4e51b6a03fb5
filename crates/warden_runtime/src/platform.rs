//! Remote platform capability.

use async_trait::async_trait;
use warden_core::{Credentials, Post, Session};
use warden_error::PlatformResult;

/// Login, listing, and reaction primitives of a social platform.
///
/// The runtime never inspects how these are implemented. Errors are reported
/// as [`warden_error::PlatformError`]; their kind decides whether a failed
/// fetch counts as a platform outage or a transient failure.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns error if the credentials are refused or the platform is unreachable.
    async fn authenticate(&self, credentials: &Credentials) -> PlatformResult<Session>;

    /// Fetch up to `limit` of the most recently created posts in `community`,
    /// newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the listing cannot be retrieved.
    async fn fetch_recent(
        &self,
        session: &Session,
        community: &str,
        limit: usize,
    ) -> PlatformResult<Vec<Post>>;

    /// Upvote a post.
    ///
    /// # Errors
    ///
    /// Returns error if the platform rejects the vote.
    async fn upvote(&self, session: &Session, post: &Post) -> PlatformResult<()>;

    /// Reply to a post with `text`.
    ///
    /// # Errors
    ///
    /// Returns error if the platform rejects the reply.
    async fn reply(&self, session: &Session, post: &Post, text: &str) -> PlatformResult<()>;

    /// Short platform name used in logs.
    fn platform_name(&self) -> &str;
}
