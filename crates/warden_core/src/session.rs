//! Authentication handle.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Handle returned by a successful platform login.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Session {
    /// Identity the session belongs to.
    identity: String,
    /// Opaque bearer token.
    token: String,
    /// When the session was established.
    established_at: DateTime<Utc>,
}

impl Session {
    /// Create a session established now.
    pub fn new(identity: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            token: token.into(),
            established_at: Utc::now(),
        }
    }
}
