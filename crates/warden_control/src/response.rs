//! Operation responses and the action log line.

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;
use warden_error::ControlError;

/// Whether an operation succeeded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The operation did what was asked.
    #[display("SUCCESS")]
    Success,
    /// The operation was refused or failed.
    #[display("ERROR")]
    Error,
}

/// Format and log one dashboard action line.
///
/// Produces `"[HH:MM:SS] <action> - <STATUS>: <details>"` in local time.
///
/// # Examples
///
/// ```
/// use warden_control::{ResponseStatus, log_action};
///
/// let line = log_action("Start Bot", ResponseStatus::Success, "Bot started for bob");
/// assert!(line.starts_with('['));
/// assert!(line.ends_with("] Start Bot - SUCCESS: Bot started for bob"));
/// ```
pub fn log_action(action: &str, status: ResponseStatus, details: &str) -> String {
    let timestamp = Local::now().format("%H:%M:%S");
    let entry = format!("[{}] {} - {}: {}", timestamp, action, status, details);
    info!(target: "warden_control::actions", "{}", entry);
    entry
}

/// Answer to a control operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlResponse {
    /// Outcome.
    pub status: ResponseStatus,
    /// Short human-readable message.
    pub message: String,
    /// Timestamped action line.
    pub log: String,
}

impl ControlResponse {
    /// Successful response for `action`.
    pub fn success(action: &str, message: impl Into<String>, details: &str) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.into(),
            log: log_action(action, ResponseStatus::Success, details),
        }
    }

    /// Failed response for `action`, described by the error kind.
    pub fn failure(action: &str, error: &ControlError) -> Self {
        let message = error.kind.to_string();
        Self {
            status: ResponseStatus::Error,
            log: log_action(action, ResponseStatus::Error, &message),
            message,
        }
    }

    /// Whether the operation succeeded.
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

/// Summary counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStatus {
    /// A session is held.
    pub authenticated: bool,
    /// The worker is polling.
    pub running: bool,
    /// Posts processed over the runtime's lifetime.
    pub messages: u64,
    /// Number of watched communities (0 or 1).
    pub communities: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_error::ControlErrorKind;

    #[test]
    fn failure_uses_error_kind_text() {
        let err = ControlError::new(ControlErrorKind::AlreadyRunning);
        let response = ControlResponse::failure("Start Bot", &err);

        assert_eq!(response.status, ResponseStatus::Error);
        assert_eq!(response.message, "Bot is already running");
        assert!(
            response
                .log
                .ends_with("Start Bot - ERROR: Bot is already running")
        );
    }

    #[test]
    fn log_line_has_clock_prefix() {
        let line = log_action("Set Target", ResponseStatus::Success, "rust");
        let (clock, rest) = line.split_at(10);
        assert_eq!(&clock[..1], "[");
        assert_eq!(&clock[9..], "]");
        assert_eq!(clock[1..9].matches(':').count(), 2);
        assert_eq!(rest, " Set Target - SUCCESS: rust");
    }

    #[test]
    fn status_serializes_lowercase() {
        let response = ControlResponse::success("Stop Bot", "stopped", "bob");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "success");
    }
}
