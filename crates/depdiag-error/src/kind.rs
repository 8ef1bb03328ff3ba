//! Error kinds for depdiag operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on this to decide how to react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // Graph errors
    // =========================================================================
    /// Invalid argument passed to a graph operation (e.g. an absent entity name)
    InvalidArgument,

    /// A match pattern failed to compile
    InvalidPattern,

    // =========================================================================
    // Configuration errors
    // =========================================================================
    /// Invalid configuration values or unreadable config document
    ConfigInvalid,

    // =========================================================================
    // Render service errors
    // =========================================================================
    /// Request or connection failure talking to the renderer
    Network,

    /// The renderer or a local path reported the resource missing
    NotFound,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Whether a caller-side retry could succeed. depdiag never retries itself.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Network | ErrorKind::IoFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::InvalidArgument.to_string(), "InvalidArgument");
        assert_eq!(ErrorKind::Network.as_str(), "Network");
    }

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::Network.is_retryable());
        assert!(ErrorKind::IoFailed.is_retryable());
        assert!(!ErrorKind::InvalidArgument.is_retryable());
        assert!(!ErrorKind::NotFound.is_retryable());
    }
}
