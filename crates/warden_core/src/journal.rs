//! Activity journal records.

use crate::{Post, PostId, ReactionPolicy};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Resolution of one processed post.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Every configured reaction was applied.
    #[display("success")]
    Success,
    /// The post was deliberately left alone.
    #[display("skipped")]
    Skipped,
    /// At least one reaction failed.
    #[display("failed")]
    Failed,
}

/// Why a post was skipped.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The author account no longer exists.
    #[display("no author")]
    NoAuthor,
    /// The author is on the protection list.
    #[display("protected")]
    Protected,
}

/// Reactions an entry refers to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    /// No reaction attempted because the post was skipped.
    #[display("skip")]
    Skip,
    /// Upvote only.
    #[display("upvote")]
    Upvote,
    /// Reply only.
    #[display("reply")]
    Reply,
    /// Upvote followed by a reply.
    #[display("upvote+reply")]
    UpvoteAndReply,
    /// The policy had nothing to apply.
    #[display("none")]
    NoReaction,
}

impl From<&ReactionPolicy> for ReactionKind {
    fn from(policy: &ReactionPolicy) -> Self {
        match (policy.upvote, policy.replies()) {
            (true, true) => Self::UpvoteAndReply,
            (true, false) => Self::Upvote,
            (false, true) => Self::Reply,
            (false, false) => Self::NoReaction,
        }
    }
}

/// One immutable line of the activity journal.
///
/// # Examples
///
/// ```
/// use warden_core::{JournalEntry, Outcome, Post, SkipReason};
///
/// let post = Post::new("t3_1", Some("alice"));
/// let entry = JournalEntry::skipped(&post, SkipReason::Protected);
/// assert_eq!(*entry.outcome(), Outcome::Skipped);
/// assert_eq!(entry.detail(), "protected");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct JournalEntry {
    /// When the post was resolved.
    timestamp: DateTime<Utc>,
    /// Reactions involved.
    action: ReactionKind,
    /// Subject post.
    post_id: PostId,
    /// Subject author, if any.
    author: Option<String>,
    /// Resolution.
    outcome: Outcome,
    /// Human-readable detail (skip reason or failure cause).
    detail: String,
}

impl JournalEntry {
    /// Create an entry timestamped now.
    pub fn new(
        action: ReactionKind,
        post: &Post,
        outcome: Outcome,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            post_id: post.id.clone(),
            author: post.author.clone(),
            outcome,
            detail: detail.into(),
        }
    }

    /// A post that was left alone.
    pub fn skipped(post: &Post, reason: SkipReason) -> Self {
        Self::new(ReactionKind::Skip, post, Outcome::Skipped, reason.to_string())
    }

    /// A post that received every configured reaction.
    pub fn success(post: &Post, action: ReactionKind) -> Self {
        let detail = match action {
            ReactionKind::NoReaction => "no reactions configured".to_string(),
            other => format!("applied {}", other),
        };
        Self::new(action, post, Outcome::Success, detail)
    }

    /// A post where at least one reaction failed.
    pub fn failed(post: &Post, action: ReactionKind, cause: impl Into<String>) -> Self {
        Self::new(action, post, Outcome::Failed, cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaction_kind_follows_policy() {
        let mut policy = ReactionPolicy::default();
        assert_eq!(ReactionKind::from(&policy), ReactionKind::Upvote);

        policy.reply_text = "hi".to_string();
        assert_eq!(ReactionKind::from(&policy), ReactionKind::UpvoteAndReply);

        policy.upvote = false;
        assert_eq!(ReactionKind::from(&policy), ReactionKind::Reply);

        policy.reply = false;
        assert_eq!(ReactionKind::from(&policy), ReactionKind::NoReaction);
    }

    #[test]
    fn entry_serializes_lowercase_outcome() {
        let post = Post::new("t3_9", None::<String>);
        let entry = JournalEntry::skipped(&post, SkipReason::NoAuthor);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["outcome"], "skipped");
        assert_eq!(json["detail"], "no author");
        assert_eq!(json["post_id"], "t3_9");
        assert!(json["author"].is_null());
    }
}
