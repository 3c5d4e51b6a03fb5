//! Errors raised while assembling runtimes and facades.

/// Why a builder refused to produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required component was never supplied.
    #[display("Missing required field: {}", _0)]
    MissingField(String),

    /// A supplied value failed validation.
    #[display("Invalid field value for '{}': {}", field, reason)]
    InvalidField {
        /// The field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Builder error with location tracking.
///
/// # Examples
///
/// ```
/// use warden_error::{BuilderError, BuilderErrorKind};
///
/// let err = BuilderError::missing("platform");
/// assert_eq!(err.kind(), &BuilderErrorKind::MissingField("platform".to_string()));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A required component was not set.
    #[track_caller]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(BuilderErrorKind::MissingField(field.into()))
    }

    /// A supplied value was rejected.
    #[track_caller]
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(BuilderErrorKind::InvalidField {
            field: field.into(),
            reason: reason.into(),
        })
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_names_field_and_reason() {
        let err = BuilderError::invalid("event_capacity", "must be at least 1");
        let text = err.to_string();
        assert!(text.contains("'event_capacity'"));
        assert!(text.contains("must be at least 1"));
        assert!(text.contains("builder.rs"));
    }
}
