//! Error types for the autopermit monitor.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for autopermit operations.
///
/// None of these terminate the poll loop; they are absorbed locally and
/// surfaced through logging and counters.
#[derive(Debug, Error)]
pub enum Error {
    /// Detection window or capture region not available this cycle
    #[error("Capture unavailable: {0}")]
    CaptureUnavailable(String),

    /// Reference image missing or corrupt; the pattern is skipped for the session
    #[error("Pattern '{name}' unreadable: {reason}")]
    PatternUnreadable {
        /// Configured button name
        name: String,
        /// Decode or IO failure description
        reason: String,
    },

    /// Input injection failed; logged and counted, never fatal
    #[error("Dispatch failed: {0}")]
    DispatchFailed(String),

    /// Allow-list text source unreadable; treated as empty for this refresh
    #[error("Allow-list source unreadable: {0}")]
    SourceUnreadable(PathBuf),

    /// Invalid key chord string
    #[error("Invalid chord: {0}")]
    InvalidChord(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_unavailable_error() {
        let err = Error::CaptureUnavailable("window not found".to_string());
        assert_eq!(err.to_string(), "Capture unavailable: window not found");
    }

    #[test]
    fn test_pattern_unreadable_error() {
        let err = Error::PatternUnreadable {
            name: "confirm".to_string(),
            reason: "no such file".to_string(),
        };
        assert_eq!(err.to_string(), "Pattern 'confirm' unreadable: no such file");
    }

    #[test]
    fn test_dispatch_failed_error() {
        let err = Error::DispatchFailed("input device busy".to_string());
        assert_eq!(err.to_string(), "Dispatch failed: input device busy");
    }

    #[test]
    fn test_source_unreadable_error() {
        let err = Error::SourceUnreadable(PathBuf::from("allow_list.txt"));
        assert_eq!(err.to_string(), "Allow-list source unreadable: allow_list.txt");
    }

    #[test]
    fn test_invalid_chord_error() {
        let err = Error::InvalidChord("ctrl+".to_string());
        assert_eq!(err.to_string(), "Invalid chord: ctrl+");
    }

    #[test]
    fn test_config_error() {
        let err = Error::Config("confidence must be within [0, 1]".to_string());
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_type() {
        let success: Result<i32> = Ok(42);
        assert!(success.is_ok());

        let failure: Result<i32> = Err(Error::DispatchFailed("test".to_string()));
        assert!(failure.is_err());
    }
}
