//! Error types for visioncare.

use thiserror::Error;

/// Errors surfaced by visioncare.
///
/// The session state machine itself never fails: invalid transitions are
/// no-ops and storage failures degrade to in-memory operation. These
/// errors come from configuration, input validation and the CLI layer.
#[derive(Debug, Error)]
pub enum VisionError {
    /// Configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database access failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized data could not be parsed or produced.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A command argument was out of range or malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for VisionError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rusqlite::Error> for VisionError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VisionError::InvalidInput("severity must be 1-5".to_string());
        assert_eq!(err.to_string(), "Invalid input: severity must be 1-5");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: VisionError = json_err.into();
        assert!(matches!(err, VisionError::Parse(_)));
    }
}
