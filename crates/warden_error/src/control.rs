//! Control facade errors.

/// Kinds of control facade errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ControlErrorKind {
    /// No runtime is registered for the identity.
    #[display("Not authenticated: no bot registered for '{}'", _0)]
    UnknownIdentity(String),

    /// Required form fields were blank.
    #[display("Please fill in all required fields: {}", _0.join(", "))]
    MissingFields(Vec<String>),

    /// The platform refused the credentials.
    #[display("Authentication failed for '{}'", _0)]
    AuthenticationFailed(String),

    /// The bot is already running.
    #[display("Bot is already running")]
    AlreadyRunning,

    /// The runtime refused to start.
    #[display("Bot failed to start: {}", _0)]
    StartFailed(String),
}

/// Control error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Control Error: {} at line {} in {}", kind, line, file)]
pub struct ControlError {
    /// The kind of error that occurred
    pub kind: ControlErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ControlError {
    /// Create a new control error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ControlErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
