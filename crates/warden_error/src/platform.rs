//! Remote platform error types.

/// How the runtime loop reacts to a failed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FailureClass {
    /// The platform itself rejected or failed the request; back off for long.
    #[display("platform outage")]
    Outage,
    /// Anything else; retry after the normal cycle interval.
    #[display("transient")]
    Transient,
}

/// Kinds of errors raised by a remote platform capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PlatformErrorKind {
    /// Credentials were refused.
    #[display("Unauthorized: {}", _0)]
    Unauthorized(String),

    /// The platform is throttling this client.
    #[display("Rate limited: retry after {}s", _0)]
    RateLimited(u64),

    /// The platform rejected the request (bad community, forbidden, archived post).
    #[display("Request rejected: {}", _0)]
    Rejected(String),

    /// The platform answered with a server-side failure.
    #[display("Platform unavailable: {}", _0)]
    Unavailable(String),

    /// The request never reached the platform or the connection dropped.
    #[display("Transport failure: {}", _0)]
    Transport(String),

    /// The platform answered with something we could not decode.
    #[display("Malformed response: {}", _0)]
    Decode(String),
}

impl PlatformErrorKind {
    /// Errors the platform itself produced, as opposed to local or network failures.
    pub fn is_outage(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_) | Self::RateLimited(_) | Self::Rejected(_) | Self::Unavailable(_)
        )
    }

    /// Classify for backoff purposes.
    pub fn class(&self) -> FailureClass {
        if self.is_outage() {
            FailureClass::Outage
        } else {
            FailureClass::Transient
        }
    }
}

/// Platform error with location tracking.
///
/// # Examples
///
/// ```
/// use warden_error::{FailureClass, PlatformError, PlatformErrorKind};
///
/// let err = PlatformError::new(PlatformErrorKind::RateLimited(30));
/// assert_eq!(err.class(), FailureClass::Outage);
///
/// let err = PlatformError::new(PlatformErrorKind::Transport("reset".to_string()));
/// assert_eq!(err.class(), FailureClass::Transient);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Platform Error: {} at line {} in {}", kind, line, file)]
pub struct PlatformError {
    /// The kind of error that occurred
    pub kind: PlatformErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PlatformError {
    /// Create a new platform error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PlatformErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Whether this error counts as a platform outage.
    pub fn is_outage(&self) -> bool {
        self.kind.is_outage()
    }

    /// Backoff classification of this error.
    pub fn class(&self) -> FailureClass {
        self.kind.class()
    }
}

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
