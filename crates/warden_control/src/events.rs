//! Push messages for dashboard subscribers.

use serde::{Deserialize, Serialize};
use warden_runtime::{RuntimeEvent, StopReason};

/// Message pushed to control subscribers.
///
/// Serialized as `{"type": "...", "data": {...}}`.
///
/// # Examples
///
/// ```
/// use warden_control::ControlEvent;
///
/// let event = ControlEvent::BotStarted { username: "bob".to_string() };
/// let json = serde_json::to_value(&event).unwrap();
/// assert_eq!(json["type"], "bot_started");
/// assert_eq!(json["data"]["username"], "bob");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ControlEvent {
    /// An identity authenticated.
    AuthSuccess {
        /// Identity.
        username: String,
    },
    /// A runtime started.
    BotStarted {
        /// Identity.
        username: String,
    },
    /// A runtime was asked to stop, or stopped on its own.
    BotStopped {
        /// Identity.
        username: String,
    },
    /// A runtime reported a failure.
    Error {
        /// Identity.
        username: String,
        /// Failure description.
        error: String,
    },
    /// Snapshot sent when a subscriber attaches.
    Status {
        /// Whether the runtime is polling.
        active: bool,
        /// Identity.
        username: String,
    },
}

impl ControlEvent {
    /// Translate a runtime observation into the push messages it warrants.
    ///
    /// Cycle failures become `error`; a worker that exits for any reason
    /// other than a stop request yields `error` followed by `bot_stopped`.
    pub fn from_runtime(username: &str, event: &RuntimeEvent) -> Vec<ControlEvent> {
        match event {
            RuntimeEvent::CycleFailed { message, .. } => vec![ControlEvent::Error {
                username: username.to_string(),
                error: message.clone(),
            }],
            RuntimeEvent::Stopped { reason } if *reason != StopReason::Requested => vec![
                ControlEvent::Error {
                    username: username.to_string(),
                    error: reason.to_string(),
                },
                ControlEvent::BotStopped {
                    username: username.to_string(),
                },
            ],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_failure_becomes_error() {
        let event = RuntimeEvent::CycleFailed {
            outage: true,
            message: "Platform outage: 503".to_string(),
            backoff_secs: 300,
        };
        let pushed = ControlEvent::from_runtime("bob", &event);
        assert_eq!(
            pushed,
            vec![ControlEvent::Error {
                username: "bob".to_string(),
                error: "Platform outage: 503".to_string(),
            }]
        );
    }

    #[test]
    fn session_loss_reports_stop() {
        let event = RuntimeEvent::Stopped {
            reason: StopReason::SessionLost,
        };
        let pushed = ControlEvent::from_runtime("bob", &event);
        assert_eq!(pushed.len(), 2);
        assert!(matches!(pushed[1], ControlEvent::BotStopped { .. }));
    }

    #[test]
    fn requested_stop_is_not_forwarded() {
        let event = RuntimeEvent::Stopped {
            reason: StopReason::Requested,
        };
        assert!(ControlEvent::from_runtime("bob", &event).is_empty());
        assert!(ControlEvent::from_runtime("bob", &RuntimeEvent::WaitingForTarget).is_empty());
    }

    #[test]
    fn error_shape() {
        let event = ControlEvent::Error {
            username: "bob".to_string(),
            error: "boom".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"error","data":{"username":"bob","error":"boom"}}"#
        );
    }
}
