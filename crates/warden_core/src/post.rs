//! Posts fetched from a community.

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Platform-specific post identifier.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
    derive_more::From,
)]
#[display("{}", _0)]
#[serde(transparent)]
pub struct PostId(pub String);

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A post as returned by the platform's "new" listing.
///
/// # Examples
///
/// ```
/// use warden_core::Post;
///
/// let post = Post::new("t3_1", Some("bob"));
/// assert_eq!(post.author.as_deref(), Some("bob"));
///
/// let orphan = Post::new("t3_2", None::<String>);
/// assert!(orphan.author.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into))]
pub struct Post {
    /// Post identifier.
    pub id: PostId,
    /// Author name; `None` when the account was deleted.
    #[builder(default)]
    #[serde(default)]
    pub author: Option<String>,
    /// Post title, for display.
    #[builder(default)]
    #[serde(default)]
    pub title: Option<String>,
    /// Creation time reported by the platform.
    #[builder(default)]
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a post with an id and optional author.
    pub fn new(id: impl Into<PostId>, author: Option<impl Into<String>>) -> Self {
        Self {
            id: id.into(),
            author: author.map(Into::into),
            title: None,
            created_at: None,
        }
    }
}
