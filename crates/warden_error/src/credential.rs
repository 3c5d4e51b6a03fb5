//! Credential validation errors.

/// Raised when a credential set is incomplete.
///
/// Never retried automatically; the caller has to supply the missing fields.
///
/// # Examples
///
/// ```
/// use warden_error::CredentialError;
///
/// let err = CredentialError::new(vec!["secret", "application_key"]);
/// assert_eq!(err.missing, vec!["secret", "application_key"]);
/// assert!(format!("{}", err).contains("secret, application_key"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Credential Error: missing {} at line {} in {}", missing.join(", "), line, file)]
pub struct CredentialError {
    /// Names of the fields that were absent or blank
    pub missing: Vec<&'static str>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl CredentialError {
    /// Create a new credential error listing the missing fields.
    #[track_caller]
    pub fn new(missing: Vec<&'static str>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            missing,
            line: location.line(),
            file: location.file(),
        }
    }
}
