use thiserror::Error;

/// Unified error type for release-notes operations
#[derive(Error, Debug)]
pub enum ReleaseNotesError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Repository state error: {0}")]
    RepositoryState(String),

    #[error("Editor failed: {0}")]
    Editor(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in release-notes
pub type Result<T> = std::result::Result<T, ReleaseNotesError>;

impl ReleaseNotesError {
    /// Create a configuration error with context
    pub fn configuration(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Configuration(msg.into())
    }

    /// Create a validation error with context
    pub fn validation(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Validation(msg.into())
    }

    /// Create a not-found error with context
    pub fn not_found(msg: impl Into<String>) -> Self {
        ReleaseNotesError::NotFound(msg.into())
    }

    /// Create a format error with context
    pub fn format(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Format(msg.into())
    }

    pub fn repository_state(msg: impl Into<String>) -> Self {
        ReleaseNotesError::RepositoryState(msg.into())
    }

    pub fn editor(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Editor(msg.into())
    }

    pub fn prompt(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Prompt(msg.into())
    }
}

impl From<dialoguer::Error> for ReleaseNotesError {
    fn from(err: dialoguer::Error) -> Self {
        ReleaseNotesError::Prompt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseNotesError::configuration("no version descriptor");
        assert_eq!(
            err.to_string(),
            "Configuration error: no version descriptor"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseNotesError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ReleaseNotesError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseNotesError::configuration("x"), "Configuration error"),
            (ReleaseNotesError::validation("x"), "Validation error"),
            (ReleaseNotesError::not_found("x"), "Not found"),
            (ReleaseNotesError::format("x"), "Format error"),
            (ReleaseNotesError::repository_state("x"), "Repository state error"),
            (ReleaseNotesError::editor("x"), "Editor failed"),
            (ReleaseNotesError::prompt("x"), "Prompt failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_keeps_message_verbatim() {
        let msg = "\"1.0.0\" must be larger than \"v1.2.0\"";
        let err = ReleaseNotesError::validation(msg);
        assert!(err.to_string().contains(msg));
    }
}
