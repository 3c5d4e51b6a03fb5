//! Bounded activity journal.

use serde::Serialize;
use std::collections::VecDeque;
use warden_core::{JournalEntry, Outcome};

/// Lifetime outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    /// Posts that received every configured reaction.
    pub success: u64,
    /// Posts left alone.
    pub skipped: u64,
    /// Posts where a reaction failed.
    pub failed: u64,
}

impl OutcomeCounts {
    /// Sum of all outcomes.
    pub fn total(&self) -> u64 {
        self.success + self.skipped + self.failed
    }
}

/// Append-only activity log that retains the most recent entries.
///
/// Entries are never mutated. Once `capacity` is reached the oldest entry is
/// evicted, but the lifetime counters keep counting.
///
/// # Examples
///
/// ```
/// use warden_core::{JournalEntry, Post, SkipReason};
/// use warden_runtime::Journal;
///
/// let mut journal = Journal::new(2);
/// for id in ["1", "2", "3"] {
///     journal.push(JournalEntry::skipped(&Post::new(id, None::<String>), SkipReason::NoAuthor));
/// }
///
/// assert_eq!(journal.len(), 2);
/// assert_eq!(journal.total(), 3);
/// assert_eq!(journal.entries().next().unwrap().post_id().0, "2");
/// ```
#[derive(Debug, Clone)]
pub struct Journal {
    entries: VecDeque<JournalEntry>,
    capacity: usize,
    counts: OutcomeCounts,
}

impl Journal {
    /// Default number of retained entries.
    pub const DEFAULT_CAPACITY: usize = 1000;

    /// Create a journal retaining at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY)),
            capacity,
            counts: OutcomeCounts::default(),
        }
    }

    /// Append an entry, evicting the oldest one when full.
    pub fn push(&mut self, entry: JournalEntry) {
        match entry.outcome() {
            Outcome::Success => self.counts.success += 1,
            Outcome::Skipped => self.counts.skipped += 1,
            Outcome::Failed => self.counts.failed += 1,
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries ever recorded.
    pub fn total(&self) -> u64 {
        self.counts.total()
    }

    /// Lifetime counters by outcome.
    pub fn counts(&self) -> OutcomeCounts {
        self.counts
    }

    /// Maximum number of retained entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    /// The `n` most recent entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<JournalEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::{Post, ReactionKind};

    #[test]
    fn counts_survive_eviction() {
        let mut journal = Journal::new(1);
        let post = Post::new("1", Some("bob"));
        journal.push(JournalEntry::success(&post, ReactionKind::Upvote));
        journal.push(JournalEntry::failed(&post, ReactionKind::Upvote, "boom"));

        assert_eq!(journal.len(), 1);
        assert_eq!(journal.counts().success, 1);
        assert_eq!(journal.counts().failed, 1);
        assert_eq!(journal.total(), 2);
    }

    #[test]
    fn recent_returns_tail() {
        let mut journal = Journal::default();
        for id in 0..5 {
            journal.push(JournalEntry::success(
                &Post::new(id.to_string().as_str(), Some("bob")),
                ReactionKind::Upvote,
            ));
        }
        let ids: Vec<_> = journal.recent(2).iter().map(|e| e.post_id().0.clone()).collect();
        assert_eq!(ids, vec!["3", "4"]);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        assert_eq!(Journal::new(0).capacity(), 1);
    }
}
