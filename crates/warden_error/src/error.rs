//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, ControlError, CredentialError, PlatformError, RuntimeError,
    SettingsError,
};

/// Every error the Warden crates can surface.
///
/// # Examples
///
/// ```
/// use warden_error::{ConfigError, WardenError};
///
/// let err: WardenError = ConfigError::new("batch size must be positive").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum WardenErrorKind {
    /// Incomplete credentials
    #[from(CredentialError)]
    Credential(CredentialError),
    /// Remote platform error
    #[from(PlatformError)]
    Platform(PlatformError),
    /// Runtime lifecycle error
    #[from(RuntimeError)]
    Runtime(RuntimeError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Settings persistence error
    #[from(SettingsError)]
    Settings(SettingsError),
    /// Control facade error
    #[from(ControlError)]
    Control(ControlError),
}

/// Warden error with kind discrimination.
///
/// # Examples
///
/// ```
/// use warden_error::{ConfigError, WardenResult};
///
/// fn might_fail() -> WardenResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Warden Error: {}", _0)]
pub struct WardenError(Box<WardenErrorKind>);

impl WardenError {
    /// Create a new error from a kind.
    pub fn new(kind: WardenErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WardenErrorKind {
        &self.0
    }
}

impl<T> From<T> for WardenError
where
    T: Into<WardenErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Warden operations.
pub type WardenResult<T> = std::result::Result<T, WardenError>;
