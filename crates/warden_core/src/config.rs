//! Live runtime configuration.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which reactions the runtime applies to eligible posts.
///
/// # Examples
///
/// ```
/// use warden_core::ReactionPolicy;
///
/// let policy = ReactionPolicy::default();
/// assert!(policy.upvote);
/// // Replies stay off until there is something to say.
/// assert!(!policy.replies());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct ReactionPolicy {
    /// Upvote eligible posts.
    pub upvote: bool,
    /// Reply to eligible posts.
    pub reply: bool,
    /// Text of the reply.
    pub reply_text: String,
}

impl Default for ReactionPolicy {
    fn default() -> Self {
        Self {
            upvote: true,
            reply: true,
            reply_text: String::new(),
        }
    }
}

impl ReactionPolicy {
    /// Whether a reply will actually be sent.
    pub fn replies(&self) -> bool {
        self.reply && !self.reply_text.is_empty()
    }

    /// Whether the policy applies no reaction at all.
    pub fn is_inert(&self) -> bool {
        !self.upvote && !self.replies()
    }
}

/// Configuration the loop reads at the start of every cycle.
///
/// # Examples
///
/// ```
/// use warden_core::{ReactionPolicyBuilder, RuntimeConfigBuilder};
///
/// let config = RuntimeConfigBuilder::default()
///     .target_community("rust")
///     .protected(["alice".to_string()].into_iter().collect::<std::collections::BTreeSet<_>>())
///     .reactions(ReactionPolicyBuilder::default().reply_text("hi").build().unwrap())
///     .build()
///     .unwrap();
///
/// assert!(config.is_protected("alice"));
/// assert!(!config.is_protected("Alice"));
/// assert!(config.reactions.replies());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Community to watch; empty means "wait for a target".
    pub target_community: String,
    /// Identities that never receive reactions (exact, case-sensitive).
    pub protected: BTreeSet<String>,
    /// Reactions to apply.
    pub reactions: ReactionPolicy,
}

impl RuntimeConfig {
    /// Whether a target community is configured.
    ///
    /// A whitespace-only name counts as unset, the same as a blank
    /// credential field.
    pub fn has_target(&self) -> bool {
        !self.target_community.trim().is_empty()
    }

    /// Whether `author` is on the protection list.
    pub fn is_protected(&self, author: &str) -> bool {
        self.protected.contains(author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_community_is_no_target() {
        let mut config = RuntimeConfig::default();
        assert!(!config.has_target());

        config.target_community = "  ".to_string();
        assert!(!config.has_target());

        config.target_community = "rust".to_string();
        assert!(config.has_target());
    }
}
