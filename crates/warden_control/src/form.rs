//! Authentication form submitted by an operator.

use serde::{Deserialize, Serialize};
use warden_core::{Credentials, RuntimeConfig};

/// Default client signature sent to the platform.
pub(crate) const DEFAULT_CLIENT_SIGNATURE: &str = concat!("warden/", env!("CARGO_PKG_VERSION"));

fn default_client_signature() -> String {
    DEFAULT_CLIENT_SIGNATURE.to_string()
}

/// Credentials plus target community, as entered on the dashboard.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSettings {
    /// Account identity.
    #[serde(default)]
    pub identity: String,
    /// Account secret.
    #[serde(default)]
    pub secret: String,
    /// Application key.
    #[serde(default)]
    pub application_key: String,
    /// Application secret.
    #[serde(default)]
    pub application_secret: String,
    /// Client signature; defaults to `warden/<version>`.
    #[serde(default = "default_client_signature")]
    pub client_signature: String,
    /// Community to watch.
    #[serde(default)]
    pub community: String,
}

impl std::fmt::Debug for BotSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotSettings")
            .field("identity", &self.identity)
            .field("community", &self.community)
            .finish_non_exhaustive()
    }
}

impl BotSettings {
    /// Build a form with the default client signature.
    pub fn new(
        identity: impl Into<String>,
        secret: impl Into<String>,
        application_key: impl Into<String>,
        application_secret: impl Into<String>,
        community: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
            application_key: application_key.into(),
            application_secret: application_secret.into(),
            client_signature: default_client_signature(),
            community: community.into(),
        }
    }

    /// Names of every blank field, community included.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing: Vec<String> = self
            .credentials()
            .missing_fields()
            .into_iter()
            .map(str::to_string)
            .collect();
        if self.community.trim().is_empty() {
            missing.push("community".to_string());
        }
        missing
    }

    /// Trimmed identity.
    pub fn identity(&self) -> &str {
        self.identity.trim()
    }

    /// Credential part of the form.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.identity.trim(),
            self.secret.clone(),
            self.application_key.trim(),
            self.application_secret.clone(),
            self.client_signature.trim(),
        )
    }

    /// `base` with the form's community as target.
    pub fn apply_to(&self, mut base: RuntimeConfig) -> RuntimeConfig {
        base.target_community = self.community.trim().to_string();
        base
    }
}
