//! Runtime error types.

use crate::{CredentialError, FailureClass, PlatformError};

/// Kinds of runtime errors.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RuntimeErrorKind {
    /// Credentials incomplete.
    #[display("{}", _0)]
    Credentials(CredentialError),

    /// The authentication exchange failed.
    #[display("Authentication failed: {}", _0)]
    AuthenticationFailed(PlatformError),

    /// The batch fetch was rejected by the platform.
    #[display("Platform outage: {}", _0)]
    PlatformOutage(PlatformError),

    /// Any other failure during a loop cycle.
    #[display("Transient loop error: {}", _0)]
    Transient(String),

    /// The session disappeared while the loop was running.
    #[display("Session lost")]
    SessionLost,

    /// A loop is already active for this runtime.
    #[display("Runtime already active")]
    AlreadyActive,
}

impl RuntimeErrorKind {
    /// Backoff class for a failed cycle.
    ///
    /// Only meaningful for errors raised inside the loop.
    pub fn class(&self) -> FailureClass {
        match self {
            Self::PlatformOutage(_) => FailureClass::Outage,
            _ => FailureClass::Transient,
        }
    }
}

/// Runtime error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Runtime Error: {} at line {} in {}", kind, line, file)]
pub struct RuntimeError {
    /// The kind of error that occurred
    pub kind: RuntimeErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RuntimeError {
    /// Create a new runtime error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RuntimeErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Backoff class for a failed cycle.
    pub fn class(&self) -> FailureClass {
        self.kind.class()
    }
}

impl From<CredentialError> for RuntimeError {
    #[track_caller]
    fn from(err: CredentialError) -> Self {
        Self::new(RuntimeErrorKind::Credentials(err))
    }
}

/// Classifies a fetch failure: platform-side errors are outages, the rest transient.
impl From<PlatformError> for RuntimeError {
    #[track_caller]
    fn from(err: PlatformError) -> Self {
        if err.is_outage() {
            Self::new(RuntimeErrorKind::PlatformOutage(err))
        } else {
            Self::new(RuntimeErrorKind::Transient(err.to_string()))
        }
    }
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
