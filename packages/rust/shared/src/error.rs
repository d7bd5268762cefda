//! Error types for the thesaurus expander.
//!
//! Library crates use [`ThesaurusError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all thesaurus operations.
#[derive(Debug, thiserror::Error)]
pub enum ThesaurusError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP setup error. Per-request failures never surface here.
    #[error("network error: {0}")]
    Network(String),

    /// An extraction pattern failed to compile.
    #[error("invalid pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (empty term, bad template, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ThesaurusError>;

impl ThesaurusError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a pattern error for the given regex source.
    pub fn pattern(pattern: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = ThesaurusError::config("missing base url");
        assert_eq!(err.to_string(), "config error: missing base url");

        let err = ThesaurusError::pattern("<p>(", "unclosed group");
        assert!(err.to_string().contains("`<p>(`"));
        assert!(err.to_string().contains("unclosed group"));
    }

    #[test]
    fn io_error_keeps_path() {
        let err = ThesaurusError::io(
            "/tmp/store/terms.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("terms.txt"));
    }
}
