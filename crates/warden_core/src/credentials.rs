//! Platform credentials.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use warden_error::CredentialError;

/// Credential bundle for one platform identity.
///
/// Every field may be blank when deserialized from a partially filled form;
/// [`Credentials::validate`] reports which ones are missing.
///
/// # Examples
///
/// ```
/// use warden_core::Credentials;
///
/// let creds = Credentials::new("bot", "hunter2", "key", "app-secret", "warden/0.1");
/// assert!(creds.validate().is_ok());
///
/// let partial = Credentials::new("bot", "", "key", " ", "warden/0.1");
/// let err = partial.validate().unwrap_err();
/// assert_eq!(err.missing, vec!["secret", "application_secret"]);
/// ```
#[derive(Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Account name on the platform.
    identity: String,
    /// Account password.
    secret: String,
    /// Registered application key.
    application_key: String,
    /// Registered application secret.
    application_secret: String,
    /// Client signature sent with every request.
    client_signature: String,
}

impl Credentials {
    /// Create a credential bundle.
    pub fn new(
        identity: impl Into<String>,
        secret: impl Into<String>,
        application_key: impl Into<String>,
        application_secret: impl Into<String>,
        client_signature: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            secret: secret.into(),
            application_key: application_key.into(),
            application_secret: application_secret.into(),
            client_signature: client_signature.into(),
        }
    }

    /// Names of blank fields, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("identity", &self.identity),
            ("secret", &self.secret),
            ("application_key", &self.application_key),
            ("application_secret", &self.application_secret),
            ("client_signature", &self.client_signature),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Check that every field is present.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] naming each blank field.
    #[track_caller]
    pub fn validate(&self) -> Result<(), CredentialError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CredentialError::new(missing))
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("identity", &self.identity)
            .field("secret", &"<redacted>")
            .field("application_key", &self.application_key)
            .field("application_secret", &"<redacted>")
            .field("client_signature", &self.client_signature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secrets() {
        let creds = Credentials::new("bot", "hunter2", "key", "topsecret", "sig");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("bot"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("topsecret"));
    }

    #[test]
    fn default_is_missing_everything() {
        assert_eq!(Credentials::default().missing_fields().len(), 5);
    }
}
