//! Error types for tagsum.

use thiserror::Error;

/// Result type alias using tagsum's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tagsum operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Embed configuration string was malformed
    #[error("Invalid embed config: {0}")]
    Config(String),

    /// Target document could not be resolved in the store.
    /// The display text is rendered verbatim into the embed surface.
    #[error("File {0} not found")]
    DocumentNotFound(String),

    /// Document store operation failed
    #[error("Store error: {0}")]
    Store(String),

    /// Inline rendering or surface output failed
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(format!("serialization: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing ':' separator".to_string());
        assert_eq!(err.to_string(), "Invalid embed config: missing ':' separator");
    }

    #[test]
    fn test_error_display_document_not_found() {
        // This exact wording is user-visible inside embed blocks.
        let err = Error::DocumentNotFound("notes".to_string());
        assert_eq!(err.to_string(), "File notes not found");
    }

    #[test]
    fn test_error_display_store() {
        let err = Error::Store("backend unavailable".to_string());
        assert_eq!(err.to_string(), "Store error: backend unavailable");
    }

    #[test]
    fn test_error_display_render() {
        let err = Error::Render("surface detached".to_string());
        assert_eq!(err.to_string(), "Render error: surface detached");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("empty tag word".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty tag word");
    }

    #[test]
    fn test_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let err: Error = bad.expect_err("parse must fail").into();
        assert!(matches!(err, Error::Internal(_)));
    }
}
