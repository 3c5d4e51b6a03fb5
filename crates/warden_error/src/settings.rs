//! Settings persistence errors.

use std::path::PathBuf;

/// Kinds of settings store errors.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SettingsErrorKind {
    /// Reading or writing the settings file failed.
    #[display("Settings I/O error: {} ({})", path.display(), message)]
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// The settings file is not valid JSON for the expected shape.
    #[display("Settings JSON error: {}", _0)]
    Json(String),
}

/// Settings error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Settings Error: {} at line {} in {}", kind, line, file)]
pub struct SettingsError {
    /// The kind of error that occurred
    pub kind: SettingsErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl SettingsError {
    /// Create a new settings error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SettingsErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// I/O failure on `path`.
    #[track_caller]
    pub fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::new(SettingsErrorKind::Io {
            path: path.into(),
            message: err.to_string(),
        })
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for SettingsError {
    #[track_caller]
    fn from(e: serde_json::Error) -> Self {
        Self::new(SettingsErrorKind::Json(e.to_string()))
    }
}
