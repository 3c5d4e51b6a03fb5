//! In-memory platform for dry runs and tests.

use crate::Platform;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use warden_core::{Credentials, Post, PostId, Session};
use warden_error::{PlatformError, PlatformErrorKind, PlatformResult};

/// A reaction that reached the platform successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedReaction {
    /// Upvote on a post.
    Upvote(PostId),
    /// Reply on a post with its text.
    Reply(PostId, String),
}

#[derive(Debug, Default)]
struct MemoryState {
    communities: HashMap<String, Vec<Post>>,
    reactions: Vec<RecordedReaction>,
    fetches: Vec<(String, Instant)>,
    auth_calls: usize,
    auth_failure: Option<PlatformErrorKind>,
    fetch_failures: VecDeque<PlatformErrorKind>,
    failing_upvotes: HashSet<PostId>,
    failing_replies: HashSet<PostId>,
    reaction_delay: Option<Duration>,
}

/// Platform backed by in-process community listings.
///
/// Records every successful reaction and every fetch (with the tokio clock
/// time it happened), and can be scripted to fail specific calls.
///
/// # Examples
///
/// ```
/// use warden_core::Post;
/// use warden_runtime::InMemoryPlatform;
///
/// let platform = InMemoryPlatform::new()
///     .with_posts("rust", vec![Post::new("1", Some("bob")), Post::new("2", Some("carol"))]);
/// platform.fail_upvote("2");
///
/// assert_eq!(platform.fetch_count(), 0);
/// assert!(platform.reactions().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryPlatform {
    state: Mutex<MemoryState>,
}

impl InMemoryPlatform {
    /// Create an empty platform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a community listing (newest first).
    pub fn with_posts(self, community: impl Into<String>, posts: Vec<Post>) -> Self {
        self.set_posts(community, posts);
        self
    }

    /// Replace a community listing (newest first).
    pub fn set_posts(&self, community: impl Into<String>, posts: Vec<Post>) {
        self.state.lock().communities.insert(community.into(), posts);
    }

    /// Make every authentication attempt fail with `kind`.
    pub fn fail_authentication(&self, kind: PlatformErrorKind) {
        self.state.lock().auth_failure = Some(kind);
    }

    /// Let authentication succeed again.
    pub fn allow_authentication(&self) {
        self.state.lock().auth_failure = None;
    }

    /// Fail the next `times` fetches with `kind`.
    pub fn fail_next_fetches(&self, kind: PlatformErrorKind, times: usize) {
        let mut state = self.state.lock();
        for _ in 0..times {
            state.fetch_failures.push_back(kind.clone());
        }
    }

    /// Reject upvotes on the given post.
    pub fn fail_upvote(&self, id: impl Into<PostId>) {
        self.state.lock().failing_upvotes.insert(id.into());
    }

    /// Reject replies on the given post.
    pub fn fail_reply(&self, id: impl Into<PostId>) {
        self.state.lock().failing_replies.insert(id.into());
    }

    /// Make every reaction take `delay` of tokio time.
    pub fn with_reaction_delay(self, delay: Duration) -> Self {
        self.state.lock().reaction_delay = Some(delay);
        self
    }

    /// Successful reactions in call order.
    pub fn reactions(&self) -> Vec<RecordedReaction> {
        self.state.lock().reactions.clone()
    }

    /// Posts that were upvoted, in call order.
    pub fn upvoted(&self) -> Vec<PostId> {
        self.state
            .lock()
            .reactions
            .iter()
            .filter_map(|r| match r {
                RecordedReaction::Upvote(id) => Some(id.clone()),
                RecordedReaction::Reply(..) => None,
            })
            .collect()
    }

    /// Posts that were replied to, in call order.
    pub fn replied(&self) -> Vec<PostId> {
        self.state
            .lock()
            .reactions
            .iter()
            .filter_map(|r| match r {
                RecordedReaction::Reply(id, _) => Some(id.clone()),
                RecordedReaction::Upvote(_) => None,
            })
            .collect()
    }

    /// Number of fetch calls, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.state.lock().fetches.len()
    }

    /// Tokio clock time of every fetch call.
    pub fn fetch_times(&self) -> Vec<Instant> {
        self.state.lock().fetches.iter().map(|(_, at)| *at).collect()
    }

    /// Number of authentication calls.
    pub fn auth_calls(&self) -> usize {
        self.state.lock().auth_calls
    }

    async fn react(&self, post: &Post, reply: Option<&str>) -> PlatformResult<()> {
        let delay = self.state.lock().reaction_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.lock();
        let (failing, reaction) = match reply {
            None => (
                state.failing_upvotes.contains(&post.id),
                RecordedReaction::Upvote(post.id.clone()),
            ),
            Some(text) => (
                state.failing_replies.contains(&post.id),
                RecordedReaction::Reply(post.id.clone(), text.to_string()),
            ),
        };
        if failing {
            return Err(PlatformError::new(PlatformErrorKind::Rejected(format!(
                "post {} is locked",
                post.id
            ))));
        }
        state.reactions.push(reaction);
        Ok(())
    }
}

#[async_trait]
impl Platform for InMemoryPlatform {
    async fn authenticate(&self, credentials: &Credentials) -> PlatformResult<Session> {
        let mut state = self.state.lock();
        state.auth_calls += 1;
        if let Some(kind) = state.auth_failure.clone() {
            return Err(PlatformError::new(kind));
        }
        let token = format!("memory-{}", state.auth_calls);
        debug!(identity = %credentials.identity(), "InMemoryPlatform: session issued");
        Ok(Session::new(credentials.identity().clone(), token))
    }

    async fn fetch_recent(
        &self,
        _session: &Session,
        community: &str,
        limit: usize,
    ) -> PlatformResult<Vec<Post>> {
        let mut state = self.state.lock();
        state.fetches.push((community.to_string(), Instant::now()));
        if let Some(kind) = state.fetch_failures.pop_front() {
            return Err(PlatformError::new(kind));
        }
        let posts = state
            .communities
            .get(community)
            .map(|posts| posts.iter().take(limit).cloned().collect())
            .unwrap_or_default();
        Ok(posts)
    }

    async fn upvote(&self, _session: &Session, post: &Post) -> PlatformResult<()> {
        self.react(post, None).await
    }

    async fn reply(&self, _session: &Session, post: &Post, text: &str) -> PlatformResult<()> {
        self.react(post, Some(text)).await
    }

    fn platform_name(&self) -> &str {
        "memory"
    }
}
