//! Unified error types for chatscope.
//!
//! This module provides a single [`ChatscopeError`] enum that covers all
//! error cases in the library.
//!
//! Note that an export in which no message delimiter can be found is NOT an
//! error: it is the [`Corrupted`](crate::parser::ParseOutcome::Corrupted)
//! parse outcome, which callers must branch on before running any
//! aggregation. Errors here are reserved for conditions that abort the
//! pipeline outright (I/O failures, timestamps that survived delimiter
//! matching but violate the export's calendar format, output failures).

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatscope operations.
pub type Result<T> = std::result::Result<T, ChatscopeError>;

/// The error type for all chatscope operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatscopeError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A date string matched the message delimiter pattern but failed strict
    /// calendar parsing.
    ///
    /// This is fatal for the whole parse: it means the export violates the
    /// vendor format assumption itself (month 13, hour 13 in 12-hour time),
    /// not that a single message is malformed.
    #[error("invalid timestamp '{input}': expected 'd/m/yy, h:mm am/pm' as in '12/1/23, 9:15 am'")]
    Timestamp {
        /// The timestamp string that failed to parse
        input: String,
    },

    /// The requested sender does not appear in the export.
    #[error("unknown sender '{name}': not a participant of this chat")]
    UnknownSender {
        /// The sender name that was requested
        name: String,
    },

    /// CSV writing error, raised when exporting the record table.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error, raised when rendering the report.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatscopeError {
    /// Creates a timestamp error from the offending date string.
    pub fn timestamp(input: impl Into<String>) -> Self {
        ChatscopeError::Timestamp {
            input: input.into(),
        }
    }

    /// Creates an unknown-sender error.
    pub fn unknown_sender(name: impl Into<String>) -> Self {
        ChatscopeError::UnknownSender { name: name.into() }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatscopeError::Io(_))
    }

    /// Returns `true` if this is a timestamp error.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, ChatscopeError::Timestamp { .. })
    }

    /// Returns `true` if this is an unknown-sender error.
    pub fn is_unknown_sender(&self) -> bool {
        matches!(self, ChatscopeError::UnknownSender { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ChatscopeError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_timestamp_error_display() {
        let err = ChatscopeError::timestamp("99/99/99, 10:00 am");
        let display = err.to_string();
        assert!(display.contains("99/99/99, 10:00 am"));
        assert!(display.contains("d/m/yy"));
    }

    #[test]
    fn test_unknown_sender_display() {
        let err = ChatscopeError::unknown_sender("Mallory");
        assert!(err.to_string().contains("Mallory"));
    }

    #[test]
    fn test_is_methods() {
        let io_err = ChatscopeError::Io(io::Error::new(io::ErrorKind::NotFound, ""));
        assert!(io_err.is_io());
        assert!(!io_err.is_timestamp());
        assert!(!io_err.is_unknown_sender());

        let ts_err = ChatscopeError::timestamp("bad");
        assert!(ts_err.is_timestamp());
        assert!(!ts_err.is_io());

        let sender_err = ChatscopeError::unknown_sender("x");
        assert!(sender_err.is_unknown_sender());
        assert!(!sender_err.is_timestamp());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = ChatscopeError::from(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_debug() {
        let err = ChatscopeError::timestamp("bad");
        let debug = format!("{:?}", err);
        assert!(debug.contains("Timestamp"));
    }
}
