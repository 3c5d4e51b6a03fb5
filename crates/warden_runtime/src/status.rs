//! Lifecycle phase and status snapshot.

use crate::OutcomeCounts;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a runtime.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum RuntimePhase {
    /// No worker is active.
    #[default]
    #[display("idle")]
    Idle,
    /// The worker is polling.
    #[display("running")]
    Running,
    /// Stop was requested; the worker exits at its next check point.
    #[display("stopping")]
    Stopping,
}

/// Consistent snapshot of a runtime, safe to serialize for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeStatus {
    /// Identity from the configured credentials.
    pub identity: String,
    /// Lifecycle phase.
    pub phase: RuntimePhase,
    /// Whether the worker is polling and has not been asked to stop.
    pub running: bool,
    /// Whether a session is held.
    pub authenticated: bool,
    /// Community the worker is watching, if any.
    pub current_community: Option<String>,
    /// Size of the protection list in use.
    pub protected_count: usize,
    /// Number of journal entries ever recorded.
    pub journal_count: u64,
    /// Lifetime counters by outcome.
    pub outcomes: OutcomeCounts,
    /// Most recent authentication or cycle failure.
    pub last_error: Option<String>,
}
