//! Runtime observations.

use serde::Serialize;
use warden_core::JournalEntry;

/// Why a worker exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// `stop()` was called.
    #[display("stop requested")]
    Requested,
    /// The session disappeared while running.
    #[display("session lost")]
    SessionLost,
    /// The worker panicked.
    #[display("worker panicked")]
    Panicked,
}

/// Observation emitted by a runtime.
///
/// Delivered over a `tokio::sync::broadcast` channel; slow receivers lose the
/// oldest events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    /// A session was established.
    Authenticated {
        /// Identity that logged in.
        identity: String,
    },
    /// Authentication was attempted and failed.
    AuthenticationFailed {
        /// Identity that tried to log in.
        identity: String,
        /// Failure cause.
        reason: String,
    },
    /// The worker started.
    Started {
        /// Identity running the worker.
        identity: String,
        /// Target community at start, if any.
        community: Option<String>,
    },
    /// No target community is configured.
    WaitingForTarget,
    /// A post was resolved.
    PostProcessed {
        /// The journal entry that was appended.
        entry: JournalEntry,
    },
    /// A cycle fetched and resolved its batch.
    CycleCompleted {
        /// Posts returned by the platform.
        fetched: usize,
        /// Posts that received every configured reaction.
        succeeded: usize,
        /// Posts left alone.
        skipped: usize,
        /// Posts where a reaction failed.
        failed: usize,
        /// Whether a stop request cut the batch short.
        interrupted: bool,
    },
    /// A cycle failed and the worker is backing off.
    CycleFailed {
        /// Whether the failure was classified as a platform outage.
        outage: bool,
        /// Failure cause.
        message: String,
        /// Seconds the worker will wait before retrying.
        backoff_secs: u64,
    },
    /// `stop()` was called while running.
    StopRequested,
    /// The worker exited.
    Stopped {
        /// Exit cause.
        reason: StopReason,
    },
}
