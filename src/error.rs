//! Error types for rulesync.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Retryability flags for agent self-correction
//! - Context-aware recovery hints
//! - Structured JSON output for the calling tool

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rulesync operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes.
///
/// Each code maps to a SCREAMING_SNAKE string. The calling tool matches on
/// the string; humans read the `Display` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    RulesWriteFailed,
    PointerReadFailed,
    PointerWriteFailed,
    IoError,
    JsonError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::RulesWriteFailed => "RULES_WRITE_FAILED",
            Self::PointerReadFailed => "POINTER_READ_FAILED",
            Self::PointerWriteFailed => "POINTER_WRITE_FAILED",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
        }
    }

    /// Whether re-running the pass after fixing the underlying problem is
    /// safe and useful.
    ///
    /// True for all per-file failures: a sync pass is idempotent, so a
    /// retry converges instead of duplicating content. False for JSON
    /// serialization failures, which no retry will fix.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RulesWriteFailed
                | Self::PointerReadFailed
                | Self::PointerWriteFailed
                | Self::IoError
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur during a sync pass.
#[derive(Error, Debug)]
pub enum Error {
    /// The canonical rules document could not be written. Always aborts the
    /// whole pass: pointer files are meaningless without the document they
    /// reference.
    #[error("failed to write rules document {path}: {source}")]
    RulesWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An existing pointer file could not be read.
    #[error("failed to read pointer file {path}: {source}")]
    PointerRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A pointer file could not be written.
    #[error("failed to write pointer file {path}: {source}")]
    PointerWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::RulesWrite { .. } => ErrorCode::RulesWriteFailed,
            Self::PointerRead { .. } => ErrorCode::PointerReadFailed,
            Self::PointerWrite { .. } => ErrorCode::PointerWriteFailed,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
        }
    }

    /// Context-aware recovery hint for agents and humans.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::RulesWrite { path, .. } => Some(format!(
                "Could not write {}. Check that the store directory exists \
                 and is writable; no pointer files were touched.",
                path.display()
            )),

            Self::PointerRead { path, .. } => Some(format!(
                "{} exists but could not be read. Fix its permissions and \
                 re-run the pass.",
                path.display()
            )),

            Self::PointerWrite { path, .. } => Some(format!(
                "Could not write {}. The existence probe treats unreadable \
                 paths as absent, so a permission problem on the file or its \
                 parent directory surfaces here as a write failure.",
                path.display()
            )),

            Self::Io(_) | Self::Json(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, and optional recovery
    /// hint. The calling tool parses this instead of stderr text.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    fn denied() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "denied")
    }

    #[test]
    fn test_error_code_mapping() {
        let err = Error::RulesWrite {
            path: PathBuf::from("/repo/.store/RULES.md"),
            source: denied(),
        };
        assert_eq!(err.error_code(), ErrorCode::RulesWriteFailed);
        assert_eq!(err.error_code().as_str(), "RULES_WRITE_FAILED");
    }

    #[test]
    fn test_file_errors_are_retryable() {
        assert!(ErrorCode::RulesWriteFailed.is_retryable());
        assert!(ErrorCode::PointerWriteFailed.is_retryable());
        assert!(!ErrorCode::JsonError.is_retryable());
    }

    #[test]
    fn test_pointer_write_hint_explains_probe_downgrade() {
        let err = Error::PointerWrite {
            path: PathBuf::from("/repo/.cursorrules"),
            source: denied(),
        };
        let hint = err.hint().unwrap();
        assert!(hint.contains("/repo/.cursorrules"));
        assert!(hint.contains("permission"));
    }

    #[test]
    fn test_structured_json_shape() {
        let err = Error::PointerRead {
            path: PathBuf::from("/repo/AGENTS.md"),
            source: denied(),
        };
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "POINTER_READ_FAILED");
        assert_eq!(json["error"]["retryable"], true);
        assert!(json["error"]["hint"].as_str().unwrap().contains("AGENTS.md"));
    }
}
